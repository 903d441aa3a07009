use std::{fmt::Debug, future::Future};

/// A language model that splits a video into timestamped topics
pub trait TopicSegmenter {
    /// Token budget for the user content, leaving room for the system prompt and the reply
    const CONTEXT_WINDOW_LIMIT: usize = 16_385 - 2_000;
    const SEGMENTER_MODEL: &str;

    type Error: Debug;

    /// Returns the model's raw reply for the assembled video context
    fn segment_topics(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<SegmentationResponse, Self::Error>>;
}

#[derive(Debug, Clone)]
pub struct SegmentationResponse {
    pub text: String,
}
