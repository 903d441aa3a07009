use std::sync::{Arc, Mutex};
use stamp_datastore::CaptionEntry;
use stamp_pulse::yt::TranscriptSource;

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub captions: Vec<CaptionEntry>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriptSource {
    /// Captions from (start seconds, text) pairs
    pub fn new(captions: &[(f64, &str)]) -> Self {
        Self {
            captions: captions
                .iter()
                .map(|(start, text)| CaptionEntry {
                    text: text.to_string(),
                    start: *start,
                    duration: 4.0,
                })
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            captions: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    type Error = anyhow::Error;

    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<CaptionEntry>, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.captions.clone())
    }
}
