//! # DataStore Module
//!
//! Flat-file snapshots of a single pipeline run: the discovered video, its raw
//! transcript and, for multi-segment videos, the parsed analysis.
//!
//! Every snapshot is one pretty-printed JSON document. A run overwrites the
//! snapshots of the previous run; nothing is carried across runs.

mod datastore;
mod domain;

pub use datastore::json_files::JsonFileStore;
pub use datastore::{SnapshotKind, SnapshotStore};
pub use domain::{AnalysisResult, CaptionEntry, Segment, VideoRecord};
