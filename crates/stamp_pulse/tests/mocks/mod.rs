pub mod channel_scraper;
pub mod datastore;
pub mod metadata;
pub mod publisher;
pub mod segmenter;
pub mod transcripts;
