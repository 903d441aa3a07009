#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse channel page: {0}")]
    ParseError(&'static str),
    #[error("Unexpected JSON shape: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No videos found on the channel.")]
    NoVideosFound,
}
