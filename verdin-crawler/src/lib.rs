pub mod anonymize;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod ingest;

pub use crawler::Crawler;
pub use error::CrawlError;
pub use fetcher::{FetchedPage, Fetcher};
pub use ingest::{PostOutcome, post_dataset, post_dataset_files};
