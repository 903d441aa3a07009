use std::sync::{Arc, Mutex};
use stamp_pulse::yt::CommentPublisher;

#[derive(Clone, Default)]
pub struct MockCommentPublisher {
    /// (video id, comment text) per posted comment
    pub posted: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockCommentPublisher {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl CommentPublisher for MockCommentPublisher {
    async fn post_comment(&self, video_id: &str, text: &str) -> anyhow::Result<String> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.posted
            .lock()
            .unwrap()
            .push((video_id.to_string(), text.to_string()));
        Ok(text.to_string())
    }
}
