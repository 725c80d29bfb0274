use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_OUTPUT_DIR;
use crate::data_models::SearchResult;
use crate::error::{ErrorKind, SearchError};
use crate::extractor::{AnchorExtractor, RecordExtractor};
use crate::transport::{ClientConfig, HttpTransport, Transport};

/// Joins the whitespace separated tokens of `query` with `+`.
/// Tokens are used as is, nothing is percent-encoded. Runs of whitespace
/// count as one separator, so `a  b` gives `a+b` even though
/// [`output_filename`] keeps both spaces.
pub fn query_param(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join("+")
}

pub fn build_search_url(base_url: &str, query: &str) -> String {
    format!(
        "{}/explore?q={}&show=Collections",
        base_url.trim_end_matches('/'),
        query_param(query)
    )
}

/// `boston marathon` -> `boston_marathon_collections.json`
pub fn output_filename(query: &str) -> String {
    format!("{}_collections.json", query.replace(' ', "_"))
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub save_to_file: bool,
    pub output_dir: PathBuf,
    pub verbose: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            save_to_file: true,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            verbose: true,
        }
    }

    pub fn save_to_file(mut self, save: bool) -> Self {
        self.save_to_file = save;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub collections_data: SearchResult,
    pub count: usize,
    pub search_url: String,
    pub filepath: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SearchFailure {
    pub error: SearchError,
    pub search_url: String,
}

/// Result of one search. Failures never escape as panics or `Err`, they end up here.
#[derive(Debug)]
pub enum SearchOutcome {
    Found(SearchReport),
    Failed(SearchFailure),
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn count(&self) -> usize {
        match self {
            SearchOutcome::Found(report) => report.count,
            SearchOutcome::Failed(_) => 0,
        }
    }

    pub fn search_url(&self) -> &str {
        match self {
            SearchOutcome::Found(report) => &report.search_url,
            SearchOutcome::Failed(failure) => &failure.search_url,
        }
    }

    pub fn collections_data(&self) -> Option<&SearchResult> {
        match self {
            SearchOutcome::Found(report) => Some(&report.collections_data),
            SearchOutcome::Failed(_) => None,
        }
    }

    pub fn filepath(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(report) => report.filepath.as_deref(),
            SearchOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Failed(failure) => Some(&failure.error),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(SearchError::kind)
    }
}

impl Serialize for SearchOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchOutcome::Found(report) => report.serialize(serializer),
            SearchOutcome::Failed(failure) => {
                let mut state = serializer.serialize_struct("SearchOutcome", 5)?;
                state.serialize_field("error", &failure.error.to_string())?;
                state.serialize_field("collections_data", &Option::<SearchResult>::None)?;
                state.serialize_field("count", &0usize)?;
                state.serialize_field("search_url", &failure.search_url)?;
                state.serialize_field("filepath", &Option::<PathBuf>::None)?;
                state.end()
            }
        }
    }
}

pub struct CollectionSearcher<T, E = AnchorExtractor> {
    base_url: String,
    transport: T,
    extractor: E,
}

impl CollectionSearcher<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, SearchError> {
        let transport = HttpTransport::new(config)?;
        let extractor = AnchorExtractor::new()?;
        Ok(CollectionSearcher::new(config.origin(), transport, extractor))
    }
}

impl<T, E> CollectionSearcher<T, E>
where
    T: Transport,
    E: RecordExtractor,
{
    pub fn new(base_url: impl Into<String>, transport: T, extractor: E) -> Self {
        CollectionSearcher {
            base_url: base_url.into(),
            transport,
            extractor,
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        build_search_url(&self.base_url, query)
    }

    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let level = log_level(request.verbose);
        let search_url = self.search_url(&request.query);
        log::log!(level, "Searching for collections with query: '{}'", request.query);
        log::log!(level, "Using search URL: {search_url}");

        match self.run(request, &search_url).await {
            Ok(report) => SearchOutcome::Found(report),
            Err(error) => {
                log::error!("search for '{}' failed: {error}", request.query);
                SearchOutcome::Failed(SearchFailure { error, search_url })
            }
        }
    }

    async fn run(&self, request: &SearchRequest, search_url: &str) -> Result<SearchReport, SearchError> {
        let level = log_level(request.verbose);

        let html = self.transport.fetch(search_url).await?;
        let collections = self.extractor.extract(&html, &self.base_url)?;
        for record in &collections {
            log::log!(level, "Collection ID: {}", record.id);
            log::log!(level, "Collection Name: {}", record.name);
            log::log!(level, "Collection URL: {}", record.url);
        }

        let result = SearchResult::new(request.query.clone(), search_url.to_string(), collections);
        let count = result.count();
        log::log!(level, "Total collections found: {count}");

        let filepath = if request.save_to_file {
            let path = save_results(&result, &request.output_dir, request.verbose)?;
            log::log!(level, "Data saved to {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(SearchReport {
            collections_data: result,
            count,
            search_url: search_url.to_string(),
            filepath,
        })
    }
}

fn log_level(verbose: bool) -> log::Level {
    if verbose {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}

/// Writes `result` as 4-space indented JSON, replacing any earlier file for the same query.
pub fn save_results(result: &SearchResult, output_dir: &Path, verbose: bool) -> Result<PathBuf, SearchError> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
        log::log!(log_level(verbose), "Created output directory: {}", output_dir.display());
    }

    let path = output_dir.join(output_filename(&result.query));
    write_pretty_json(result, &path)?;
    Ok(path)
}

/// Serializes before opening `path`, so a failed serialization leaves any
/// existing file untouched.
pub fn write_pretty_json<T: Serialize>(value: &T, path: &Path) -> Result<(), SearchError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_joins_tokens_with_plus() {
        assert_eq!(
            build_search_url("https://archive-it.org", "boston marathon"),
            "https://archive-it.org/explore?q=boston+marathon&show=Collections"
        );
    }

    #[test]
    fn search_url_collapses_runs_of_whitespace() {
        // No empty tokens, unlike a split on single spaces (`boston++marathon`).
        assert_eq!(query_param("  covid   19\tvaccine "), "covid+19+vaccine");
        assert_eq!(query_param("boston  marathon"), "boston+marathon");
        assert_eq!(output_filename("boston  marathon"), "boston__marathon_collections.json");
    }

    #[test]
    fn search_url_leaves_reserved_characters_alone() {
        assert_eq!(
            build_search_url("https://archive-it.org/", "a&b c#d"),
            "https://archive-it.org/explore?q=a&b+c#d&show=Collections"
        );
    }

    #[test]
    fn filename_replaces_spaces() {
        assert_eq!(output_filename("boston marathon"), "boston_marathon_collections.json");
        assert_eq!(output_filename("covid-19"), "covid-19_collections.json");
    }

    #[test]
    fn request_defaults() {
        let request = SearchRequest::new("boston marathon");
        assert!(request.save_to_file);
        assert!(request.verbose);
        assert_eq!(request.output_dir, PathBuf::from("../output"));
    }
}
