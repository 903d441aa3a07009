use serde_json::json;
use stamp_pulse::{parser::YtHtmlDocument, yt::ChannelScraper};

#[derive(Clone)]
pub struct MockChannelScraper {
    pub html: String,
    pub fail_with: Option<String>,
}

impl MockChannelScraper {
    pub fn new(html: String) -> Self {
        Self {
            html,
            fail_with: None,
        }
    }

    /// A channel page whose "Videos" tab lists `videos` (id, title), newest first
    pub fn with_videos(videos: &[(&str, &str)]) -> Self {
        let items: Vec<_> = videos
            .iter()
            .map(|(video_id, title)| {
                json!({
                    "richItemRenderer": { "content": { "videoRenderer": {
                        "videoId": video_id,
                        "title": { "runs": [{ "text": title }] },
                        "publishedTimeText": { "simpleText": "2 hours ago" }
                    } } }
                })
            })
            .collect();

        let initial_data = json!({
            "contents": { "twoColumnBrowseResultsRenderer": { "tabs": [
                { "tabRenderer": { "title": "Home", "selected": false } },
                { "tabRenderer": {
                    "title": "Videos",
                    "selected": true,
                    "content": { "richGridRenderer": { "contents": items } }
                } }
            ] } }
        });

        Self::new(format!(
            "<html><head><script nonce=\"mock\">var ytInitialData = {initial_data};</script></head></html>"
        ))
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            html: String::new(),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl ChannelScraper for MockChannelScraper {
    const CHANNEL_URL: &'static str = "https://youtube.com/@mock/videos";
    type Error = anyhow::Error;

    async fn scrape_channel(&self) -> anyhow::Result<YtHtmlDocument> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(YtHtmlDocument::new(self.html.clone()))
    }
}
