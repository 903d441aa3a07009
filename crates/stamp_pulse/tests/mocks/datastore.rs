use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};
use stamp_datastore::{AnalysisResult, CaptionEntry, SnapshotStore, VideoRecord};

#[derive(Clone, Default)]
pub struct MockSnapshotStore {
    pub videos: Arc<Mutex<Vec<VideoRecord>>>,
    pub transcripts: Arc<Mutex<Vec<Vec<CaptionEntry>>>>,
    pub analyses: Arc<Mutex<Vec<AnalysisResult>>>,
    pub fail_with: Option<String>,
}

impl MockSnapshotStore {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        match self.fail_with {
            Some(ref msg) => Err(anyhow::anyhow!("{}", msg)),
            None => Ok(()),
        }
    }
}

impl SnapshotStore for MockSnapshotStore {
    async fn save_video(&self, video: &VideoRecord) -> anyhow::Result<PathBuf> {
        self.check()?;
        self.videos.lock().unwrap().push(video.clone());
        Ok(PathBuf::from("video_id.json"))
    }

    async fn save_transcript(&self, transcript: &[CaptionEntry]) -> anyhow::Result<PathBuf> {
        self.check()?;
        self.transcripts.lock().unwrap().push(transcript.to_vec());
        Ok(PathBuf::from("transcript.json"))
    }

    async fn save_analysis(&self, analysis: &AnalysisResult) -> anyhow::Result<PathBuf> {
        self.check()?;
        self.analyses.lock().unwrap().push(analysis.clone());
        Ok(PathBuf::from("top_x_analysis.json"))
    }
}
