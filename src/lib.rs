pub mod config;
pub mod data_models;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod searcher;
pub mod transport;

pub use data_models::{CollectionRecord, SearchResult};
pub use error::{ErrorKind, SearchError};
pub use searcher::{CollectionSearcher, SearchOutcome, SearchRequest};
