use std::sync::{Arc, Mutex};
use stamp_pulse::yt::MetadataSource;

#[derive(Clone)]
pub struct MockMetadataSource {
    pub description: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockMetadataSource {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            description: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl MetadataSource for MockMetadataSource {
    async fn video_description(&self, video_id: &str) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.description.clone())
    }
}
