pub mod builder;

use anyhow::Context;
use stamp_datastore::{AnalysisResult, CaptionEntry, SnapshotStore, VideoRecord};

use crate::{
    comment::format_comment,
    llm::{
        prompt::{count_tokens, VideoContext},
        segmenter::TopicSegmenter,
    },
    parser::{parse_latest_video, LatestVideo},
    segments::{is_top_x, parse_segments},
    transcript::annotate_transcript,
    yt::{ChannelScraper, CommentPublisher, MetadataSource, TranscriptSource},
};

/// How a run ended. Every variant is a normal exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The latest video has no usable transcript
    NoTranscript,
    /// The description could not be fetched, usually because authorization failed
    DescriptionUnavailable,
    /// The language model call failed or returned nothing
    ModelFailed,
    /// The model classified the video as covering a single subject
    NotTopX,
    Commented(CommentReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentReport {
    pub analysis: AnalysisResult,
    pub comment: String,
    pub publish: PublishStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    Posted,
    /// Publishing is best effort; the reason is logged and reported here
    Failed(String),
    /// Dry run; nothing was sent
    Skipped,
}

/// Runs one pass over the channel's latest video: discover, transcribe, describe,
/// classify, then format and publish the timestamp comment
#[derive(Debug)]
pub struct TimestampProcessor<D, P, T, M, S, C>
where
    D: SnapshotStore + Send + Sync + 'static,
    P: ChannelScraper + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    M: MetadataSource + Send + Sync + 'static,
    S: TopicSegmenter + Send + Sync + 'static,
    C: CommentPublisher + Send + Sync + 'static,
{
    store: D,
    channel_scraper: P,
    transcripts: T,
    metadata: M,
    segmenter: S,
    publisher: C,
    dry_run: bool,
}

impl<D, P, T, M, S, C> TimestampProcessor<D, P, T, M, S, C>
where
    D: SnapshotStore + Send + Sync + 'static,
    P: ChannelScraper + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    M: MetadataSource + Send + Sync + 'static,
    S: TopicSegmenter + Send + Sync + 'static,
    C: CommentPublisher + Send + Sync + 'static,
{
    /// Loads the channel page and picks its newest published upload
    #[tracing::instrument(skip(self))]
    async fn discover_latest_video(&self) -> anyhow::Result<LatestVideo> {
        let yt_html_doc = self
            .channel_scraper
            .scrape_channel()
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to load channel page"))
            .context("Failed to load channel page")?;

        let json = yt_html_doc.to_json::<serde_json::Value>()?;
        let latest = parse_latest_video(&json)?;

        tracing::info!(
            video_id = %latest.video_id,
            title = %latest.title,
            published = ?latest.published,
            duration = ?latest.duration,
            "Found latest video"
        );
        Ok(latest)
    }

    /// `None` when the transcript is unavailable or empty
    #[tracing::instrument(skip(self))]
    async fn fetch_transcript(&self, video_id: &str) -> Option<Vec<CaptionEntry>> {
        match self.transcripts.fetch_transcript(video_id).await {
            Ok(captions) if !captions.is_empty() => Some(captions),
            Ok(_) => {
                tracing::warn!("Transcript is empty");
                None
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Transcript not available");
                None
            }
        }
    }

    /// Publishes the comment unless this is a dry run; failures are logged, never raised
    #[tracing::instrument(skip(self, comment))]
    async fn publish(&self, video_id: &str, comment: &str) -> PublishStatus {
        if self.dry_run {
            tracing::info!(%comment, "Dry run; comment not posted");
            return PublishStatus::Skipped;
        }

        match self.publisher.post_comment(video_id, comment).await {
            Ok(posted) => {
                tracing::info!(comment = %posted, "Comment posted");
                PublishStatus::Posted
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to post YouTube comment");
                PublishStatus::Failed(format!("{e:#}"))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> anyhow::Result<RunOutcome> {
        let latest = self.discover_latest_video().await?;

        let video = VideoRecord::new(&latest.video_id, &latest.title, P::CHANNEL_URL);
        self.store
            .save_video(&video)
            .await
            .context("Failed to save video snapshot")?;

        let Some(transcript) = self.fetch_transcript(&video.video_id).await else {
            tracing::info!("No transcript available. Stopping.");
            return Ok(RunOutcome::NoTranscript);
        };
        self.store
            .save_transcript(&transcript)
            .await
            .context("Failed to save transcript snapshot")?;

        let description = match self.metadata.video_description(&video.video_id).await {
            Ok(description) => description,
            Err(e) => {
                tracing::error!(error = ?e, "Failed to fetch video description. Stopping.");
                return Ok(RunOutcome::DescriptionUnavailable);
            }
        };

        let annotated_transcript = annotate_transcript(&transcript);
        let content = VideoContext {
            video_id: &video.video_id,
            title: &video.video_title,
            description: &description,
            annotated_transcript: &annotated_transcript,
        }
        .to_user_content();

        tracing::info!(
            model = S::SEGMENTER_MODEL,
            tokens = ?count_tokens(&content),
            "Analyzing for Top X content"
        );
        let response = match self.segmenter.segment_topics(&content).await {
            Ok(response) => response.text,
            Err(e) => {
                tracing::error!(error = ?e, "Model call failed. Stopping.");
                return Ok(RunOutcome::ModelFailed);
            }
        };
        tracing::info!(%response, "Model analysis");

        if !is_top_x(Some(&response)) {
            tracing::info!("This is not a Top X video. Stopping.");
            return Ok(RunOutcome::NotTopX);
        }

        let items = parse_segments(Some(&response));
        tracing::info!(segments = items.len(), "This is a Top X video");

        let analysis = AnalysisResult::new(&video, true, items, response);
        self.store
            .save_analysis(&analysis)
            .await
            .context("Failed to save analysis snapshot")?;

        let comment = format_comment(&analysis.items);
        let publish = self.publish(&video.video_id, &comment).await;

        Ok(RunOutcome::Commented(CommentReport {
            analysis,
            comment,
            publish,
        }))
    }
}
