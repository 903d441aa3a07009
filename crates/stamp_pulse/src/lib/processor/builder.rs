use stamp_datastore::SnapshotStore;

use crate::{
    llm::segmenter::TopicSegmenter,
    yt::{ChannelScraper, CommentPublisher, MetadataSource, TranscriptSource},
    TimestampProcessor,
};

pub struct TimestampProcessorBuilder<D = (), P = (), T = (), M = (), S = (), C = ()> {
    store: D,
    channel_scraper: P,
    transcripts: T,
    metadata: M,
    segmenter: S,
    publisher: C,
    dry_run: bool,
}

impl TimestampProcessorBuilder {
    pub fn new() -> Self {
        Self {
            store: (),
            channel_scraper: (),
            transcripts: (),
            metadata: (),
            segmenter: (),
            publisher: (),
            dry_run: false,
        }
    }
}

impl Default for TimestampProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, P, T, M, S, C> TimestampProcessorBuilder<D, P, T, M, S, C> {
    pub fn store<D2: SnapshotStore + Send + Sync + 'static>(
        self,
        store: D2,
    ) -> TimestampProcessorBuilder<D2, P, T, M, S, C> {
        TimestampProcessorBuilder {
            store,
            channel_scraper: self.channel_scraper,
            transcripts: self.transcripts,
            metadata: self.metadata,
            segmenter: self.segmenter,
            publisher: self.publisher,
            dry_run: self.dry_run,
        }
    }

    pub fn channel_scraper<P2: ChannelScraper + Send + Sync + 'static>(
        self,
        channel_scraper: P2,
    ) -> TimestampProcessorBuilder<D, P2, T, M, S, C> {
        TimestampProcessorBuilder {
            store: self.store,
            channel_scraper,
            transcripts: self.transcripts,
            metadata: self.metadata,
            segmenter: self.segmenter,
            publisher: self.publisher,
            dry_run: self.dry_run,
        }
    }

    pub fn transcripts<T2: TranscriptSource + Send + Sync + 'static>(
        self,
        transcripts: T2,
    ) -> TimestampProcessorBuilder<D, P, T2, M, S, C> {
        TimestampProcessorBuilder {
            store: self.store,
            channel_scraper: self.channel_scraper,
            transcripts,
            metadata: self.metadata,
            segmenter: self.segmenter,
            publisher: self.publisher,
            dry_run: self.dry_run,
        }
    }

    pub fn metadata<M2: MetadataSource + Send + Sync + 'static>(
        self,
        metadata: M2,
    ) -> TimestampProcessorBuilder<D, P, T, M2, S, C> {
        TimestampProcessorBuilder {
            store: self.store,
            channel_scraper: self.channel_scraper,
            transcripts: self.transcripts,
            metadata,
            segmenter: self.segmenter,
            publisher: self.publisher,
            dry_run: self.dry_run,
        }
    }

    pub fn segmenter<S2: TopicSegmenter + Send + Sync + 'static>(
        self,
        segmenter: S2,
    ) -> TimestampProcessorBuilder<D, P, T, M, S2, C> {
        TimestampProcessorBuilder {
            store: self.store,
            channel_scraper: self.channel_scraper,
            transcripts: self.transcripts,
            metadata: self.metadata,
            segmenter,
            publisher: self.publisher,
            dry_run: self.dry_run,
        }
    }

    pub fn publisher<C2: CommentPublisher + Send + Sync + 'static>(
        self,
        publisher: C2,
    ) -> TimestampProcessorBuilder<D, P, T, M, S, C2> {
        TimestampProcessorBuilder {
            store: self.store,
            channel_scraper: self.channel_scraper,
            transcripts: self.transcripts,
            metadata: self.metadata,
            segmenter: self.segmenter,
            publisher,
            dry_run: self.dry_run,
        }
    }

    /// Run every step except posting the comment
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl<D, P, T, M, S, C> TimestampProcessorBuilder<D, P, T, M, S, C>
where
    D: SnapshotStore + Send + Sync + 'static,
    P: ChannelScraper + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
    M: MetadataSource + Send + Sync + 'static,
    S: TopicSegmenter + Send + Sync + 'static,
    C: CommentPublisher + Send + Sync + 'static,
{
    pub fn build(self) -> TimestampProcessor<D, P, T, M, S, C> {
        TimestampProcessor {
            store: self.store,
            channel_scraper: self.channel_scraper,
            transcripts: self.transcripts,
            metadata: self.metadata,
            segmenter: self.segmenter,
            publisher: self.publisher,
            dry_run: self.dry_run,
        }
    }
}
