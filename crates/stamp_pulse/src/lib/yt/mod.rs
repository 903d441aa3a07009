pub mod data_api;
pub mod scraper;
pub mod transcripts;

use std::{fmt::Debug, future::Future};

use stamp_datastore::CaptionEntry;

use crate::parser::YtHtmlDocument;

pub trait ChannelScraper {
    const CHANNEL_URL: &str;

    type Error: Debug;

    fn scrape_channel(&self) -> impl Future<Output = anyhow::Result<YtHtmlDocument>>;
}

pub trait TranscriptSource {
    type Error: Debug;

    /// Timed captions of the video, in playback order
    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<CaptionEntry>, Self::Error>>;
}

pub trait MetadataSource {
    /// The video description, or an empty string if it has none
    fn video_description(&self, video_id: &str) -> impl Future<Output = anyhow::Result<String>>;
}

pub trait CommentPublisher {
    /// Posts `text` as a new top-level comment and returns the text as stored by YouTube
    fn post_comment(
        &self,
        video_id: &str,
        text: &str,
    ) -> impl Future<Output = anyhow::Result<String>>;
}
