use std::{future::Future, path::PathBuf};

use crate::{AnalysisResult, CaptionEntry, VideoRecord};

pub mod json_files;

/// Durable snapshots of a pipeline run
pub trait SnapshotStore {
    fn save_video(
        &self,
        video: &VideoRecord,
    ) -> impl Future<Output = anyhow::Result<PathBuf>> + Send;

    fn save_transcript(
        &self,
        transcript: &[CaptionEntry],
    ) -> impl Future<Output = anyhow::Result<PathBuf>> + Send;

    fn save_analysis(
        &self,
        analysis: &AnalysisResult,
    ) -> impl Future<Output = anyhow::Result<PathBuf>> + Send;
}

impl<T: SnapshotStore + Send + Sync> SnapshotStore for &T {
    async fn save_video(&self, video: &VideoRecord) -> anyhow::Result<PathBuf> {
        (**self).save_video(video).await
    }

    async fn save_transcript(&self, transcript: &[CaptionEntry]) -> anyhow::Result<PathBuf> {
        (**self).save_transcript(transcript).await
    }

    async fn save_analysis(&self, analysis: &AnalysisResult) -> anyhow::Result<PathBuf> {
        (**self).save_analysis(analysis).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Video,
    Transcript,
    Analysis,
}

impl SnapshotKind {
    pub fn file_name(self) -> &'static str {
        match self {
            SnapshotKind::Video => "video_id.json",
            SnapshotKind::Transcript => "transcript.json",
            SnapshotKind::Analysis => "top_x_analysis.json",
        }
    }
}
