use stamp_datastore::CaptionEntry;
use yt_transcript_rs::YouTubeTranscriptApi;

use crate::yt::TranscriptSource;

/// Fetches the public caption track of a video
pub struct YtTranscriptFetcher {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Transcript not available: {0}")]
    Unavailable(String),
}

impl YtTranscriptFetcher {
    pub fn new() -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TranscriptError::Unavailable(e.to_string()))?;

        Ok(Self {
            api,
            languages: vec!["en".to_string()],
        })
    }
}

impl TranscriptSource for YtTranscriptFetcher {
    type Error = TranscriptError;

    #[tracing::instrument(skip(self))]
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<CaptionEntry>, Self::Error> {
        let languages = self.languages.iter().map(String::as_str).collect::<Vec<_>>();

        let fetched = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch transcript"))
            .map_err(|e| TranscriptError::Unavailable(e.to_string()))?;

        Ok(fetched
            .snippets
            .into_iter()
            .map(|snippet| CaptionEntry {
                text: snippet.text,
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect())
    }
}
