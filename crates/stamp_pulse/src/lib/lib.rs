pub mod auth;
pub mod comment;
mod error;
mod llm;
pub mod parser;
mod processor;
pub mod segments;
#[cfg(test)]
mod test_http;
pub mod tracing;
pub mod transcript;
pub mod types;
pub mod yt;

pub use error::Error;
pub use llm::openai;
pub use llm::{
    prompt::VideoContext,
    segmenter::{SegmentationResponse, TopicSegmenter},
};
pub use processor::{
    builder::TimestampProcessorBuilder, CommentReport, PublishStatus, RunOutcome,
    TimestampProcessor,
};
