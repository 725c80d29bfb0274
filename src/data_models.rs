use serde::{Deserialize, Serialize};

/// One collection discovered on the search results page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CollectionRecord {
    /// Digits taken from the `/collections/<id>` part of the link.
    pub id: String,
    pub name: String,
    pub url: String,
}

impl CollectionRecord {
    pub fn new(id: String, name: String, url: String) -> CollectionRecord {
        CollectionRecord { id, name, url }
    }
}

/// Everything found for a single query. This is also the layout of the saved JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub query: String,
    pub search_url: String,
    pub collections: Vec<CollectionRecord>,
}

impl SearchResult {
    pub fn new(query: String, search_url: String, collections: Vec<CollectionRecord>) -> SearchResult {
        SearchResult {
            query,
            search_url,
            collections,
        }
    }

    pub fn count(&self) -> usize {
        self.collections.len()
    }

    /// Exact, case-sensitive name match. First hit wins when names repeat.
    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id.as_str())
    }
}
