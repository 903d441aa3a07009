use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::{
    datastore::{SnapshotKind, SnapshotStore},
    AnalysisResult, CaptionEntry, VideoRecord,
};

/// Writes each snapshot as a pretty-printed JSON file inside `dir`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates the snapshot directory if it does not exist yet
    pub async fn init(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();

        tokio::fs::create_dir_all(&dir)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, dir = ?dir, "Failed to create snapshot directory"))
            .with_context(|| format!("Failed to create snapshot directory {}", dir.display()))?;

        Ok(JsonFileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, kind: SnapshotKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    async fn write_snapshot<T>(&self, kind: SnapshotKind, value: &T) -> anyhow::Result<PathBuf>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path_of(kind);
        let json = serde_json::to_vec_pretty(value)
            .with_context(|| format!("Failed to serialize {kind:?} snapshot"))?;

        tokio::fs::write(&path, json)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, path = ?path, "Failed to write snapshot"))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(path = %path.display(), "Snapshot saved");
        Ok(path)
    }
}

impl SnapshotStore for JsonFileStore {
    async fn save_video(&self, video: &VideoRecord) -> anyhow::Result<PathBuf> {
        self.write_snapshot(SnapshotKind::Video, video).await
    }

    async fn save_transcript(&self, transcript: &[CaptionEntry]) -> anyhow::Result<PathBuf> {
        self.write_snapshot(SnapshotKind::Transcript, transcript).await
    }

    async fn save_analysis(&self, analysis: &AnalysisResult) -> anyhow::Result<PathBuf> {
        self.write_snapshot(SnapshotKind::Analysis, analysis).await
    }
}
