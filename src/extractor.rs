use regex::Regex;
use scraper::{Html, Selector};

use crate::data_models::CollectionRecord;
use crate::error::SearchError;

/// Turns a search results page into collection records.
pub trait RecordExtractor {
    fn extract(&self, html: &str, base_url: &str) -> Result<Vec<CollectionRecord>, SearchError>;
}

/// Picks every `<a>` whose href contains `/collections/` and keeps the ones
/// carrying a numeric id. Document order, duplicates kept.
pub struct AnchorExtractor {
    anchors: Selector,
    collection_id: Regex,
}

impl AnchorExtractor {
    pub fn new() -> Result<AnchorExtractor, SearchError> {
        let anchors = Selector::parse(r#"a[href*="/collections/"]"#)
            .map_err(|e| SearchError::Selector(e.to_string()))?;
        // ASCII digits only, `\d` would also accept other scripts.
        let collection_id =
            Regex::new(r"/collections/([0-9]+)").map_err(|e| SearchError::Selector(e.to_string()))?;
        Ok(AnchorExtractor {
            anchors,
            collection_id,
        })
    }

    pub fn collection_id<'a>(&self, href: &'a str) -> Option<&'a str> {
        self.collection_id
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl RecordExtractor for AnchorExtractor {
    fn extract(&self, html: &str, base_url: &str) -> Result<Vec<CollectionRecord>, SearchError> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();
        for element in document.select(&self.anchors) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(id) = self.collection_id(href) else {
                log::debug!("skipping collection link without an id: {href}");
                continue;
            };
            let name = element.text().collect::<String>().trim().to_string();
            let url = absolute_url(base_url, href);
            records.push(CollectionRecord::new(id.to_string(), name, url));
        }

        Ok(records)
    }
}

/// Puts the service origin in front of `href`. Hrefs that already carry a
/// scheme are kept as they are; nothing else is resolved or normalized.
pub fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}
