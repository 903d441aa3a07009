//! # Yt Parser
//!
//! Extracts the `ytInitialData` blob embedded in a YouTube channel page and
//! picks the most recent upload from the channel's "Videos" tab.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{error::Error, types::VideoRenderer};

static YT_INTIALDATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?s)<script[^>]*>\s*var\s+ytInitialData\s*=\s*(\{.*?\});\s*</script>")
        .unwrap()
});

const TITLE_FALLBACK: &str = "Title not available";

/// The newest upload found on a channel page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestVideo {
    pub video_id: String,
    pub title: String,
    /// Relative publish time as shown by YouTube, e.g. "3 hours ago"
    pub published: Option<String>,
    /// Length as shown by YouTube, e.g. "12:34"
    pub duration: Option<String>,
}

impl From<VideoRenderer> for LatestVideo {
    fn from(
        VideoRenderer {
            video_id,
            title,
            published_time_text,
            length_text,
            ..
        }: VideoRenderer,
    ) -> Self {
        let title = title
            .runs
            .into_iter()
            .next()
            .map(|run| run.text)
            .unwrap_or_else(|| TITLE_FALLBACK.to_string());

        LatestVideo {
            video_id,
            title,
            published: published_time_text.and_then(|t| t.simple_text),
            duration: length_text.and_then(|t| t.simple_text),
        }
    }
}

/// Picks the first already-published video of the channel's "Videos" tab.
///
/// YouTube lists uploads newest first. Scheduled premieres are skipped since
/// they have no transcript yet.
///
/// # Returns
/// * `Ok(LatestVideo)` for the newest published upload.
/// * `Err(Error::NoVideosFound)` if the tab lists no published videos.
/// * `Err(Error::ParseError)` if the page structure is not recognised.
#[tracing::instrument(skip(json))]
pub fn parse_latest_video(json: &Value) -> Result<LatestVideo, Error> {
    let tabs = json["contents"]["twoColumnBrowseResultsRenderer"]["tabs"]
        .as_array()
        .ok_or(Error::ParseError(
            "Failed to get ytInitialData['contents']['twoColumnBrowseResultsRenderer']['tabs']",
        ))?;

    let videos_tab = tabs
        .iter()
        .map(|tab| &tab["tabRenderer"])
        .find(|tab| tab["selected"].as_bool() == Some(true) && tab["title"] == "Videos")
        .or_else(|| {
            tabs.iter()
                .map(|tab| &tab["tabRenderer"])
                .find(|tab| tab["title"] == "Videos")
        })
        .ok_or(Error::NoVideosFound)?;

    let Some(contents) = videos_tab["content"]["richGridRenderer"]["contents"].as_array() else {
        return Err(Error::NoVideosFound);
    };

    for item in contents {
        let Some(video_renderer) = item["richItemRenderer"]["content"]["videoRenderer"].as_object()
        else {
            continue;
        };

        let video_renderer =
            serde_json::from_value::<VideoRenderer>(Value::Object(video_renderer.clone()))?;
        if video_renderer.upcoming_event_data.is_some() {
            tracing::debug!(video_id = %video_renderer.video_id, "Skipping upcoming premiere");
            continue;
        }

        return Ok(video_renderer.into());
    }

    Err(Error::NoVideosFound)
}

pub struct YtHtmlDocument(String);

impl Deref for YtHtmlDocument {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl YtHtmlDocument {
    pub fn new(doc: String) -> Self {
        YtHtmlDocument(doc)
    }

    pub fn to_json<T>(&self) -> Result<T, crate::error::Error>
    where
        T: DeserializeOwned,
    {
        YT_INTIALDATA_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(Error::ParseError(
                "Failed to extract ytInitialData from the page's script tag",
            ))
    }
}

impl From<String> for YtHtmlDocument {
    fn from(value: String) -> Self {
        YtHtmlDocument(value)
    }
}
