use serde::{Deserialize, Serialize};

/// Identity of the video picked for a run, as written to `video_id.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub video_title: String,
    pub channel_url: String,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub extraction_date: String,
}

impl VideoRecord {
    pub const EXTRACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn new(
        video_id: impl Into<String>,
        video_title: impl Into<String>,
        channel_url: impl Into<String>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            video_title: video_title.into(),
            channel_url: channel_url.into(),
            extraction_date: chrono::Local::now()
                .format(Self::EXTRACTION_DATE_FORMAT)
                .to_string(),
        }
    }
}

/// One timed caption line of a video transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

/// A single topic of a multi-segment video.
///
/// `time` is kept exactly as the language model wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub time: String,
    pub title: String,
}

impl Segment {
    pub fn new(time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
        }
    }

    /// Interprets `time` as `SS`, `MM:SS` or `HH:MM:SS`.
    ///
    /// Returns `None` for anything else, e.g. `"~5 min"` or `"1:2:3:4"`.
    pub fn offset_seconds(&self) -> Option<u64> {
        let parts = self
            .time
            .split(':')
            .map(|p| p.trim().parse::<u64>().ok())
            .collect::<Option<Vec<u64>>>()?;

        match parts.as_slice() {
            [h, m, s] => Some(h * 3600 + m * 60 + s),
            [m, s] => Some(m * 60 + s),
            [s] => Some(*s),
            _ => None,
        }
    }
}

/// Result of analysing a video that was classified as multi-segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub video_id: String,
    pub video_title: String,
    pub is_top_x: bool,
    pub items: Vec<Segment>,
    pub raw_ai_response: String,
    pub timestamp: String,
}

impl AnalysisResult {
    pub fn new(
        video: &VideoRecord,
        is_top_x: bool,
        items: Vec<Segment>,
        raw_ai_response: impl Into<String>,
    ) -> Self {
        Self {
            video_id: video.video_id.clone(),
            video_title: video.video_title.clone(),
            is_top_x,
            items,
            raw_ai_response: raw_ai_response.into(),
            timestamp: video.extraction_date.clone(),
        }
    }
}
