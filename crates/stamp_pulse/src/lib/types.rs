//! Subset of the `ytInitialData` shapes read from a channel page

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRenderer {
    pub video_id: String,
    #[serde(default)]
    pub title: Runs,
    pub published_time_text: Option<SimpleText>,
    pub length_text: Option<SimpleText>,
    /// Present on scheduled premieres that have not aired yet
    pub upcoming_event_data: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Runs {
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
pub struct TextRun {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleText {
    pub simple_text: Option<String>,
}
