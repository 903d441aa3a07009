use std::sync::{Arc, Mutex};
use stamp_pulse::{SegmentationResponse, TopicSegmenter};

#[derive(Clone)]
pub struct MockSegmenter {
    pub response: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSegmenter {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            response: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TopicSegmenter for MockSegmenter {
    const SEGMENTER_MODEL: &'static str = "mock-gpt";
    type Error = anyhow::Error;

    async fn segment_topics(&self, content: &str) -> Result<SegmentationResponse, Self::Error> {
        self.calls.lock().unwrap().push(content.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(SegmentationResponse {
            text: self.response.clone(),
        })
    }
}
