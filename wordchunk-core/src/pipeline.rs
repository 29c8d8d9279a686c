//! Threaded streaming pipeline
//!
//! ```text
//! sources -> [scanner] -> words -> [normalizer] -> tokens -> [chunker] -> chunks -> counter
//! ```
//!
//! Each bracketed stage runs on its own thread and talks to its neighbour
//! through a bounded single-producer, single-consumer queue. A stage that
//! runs out of input drops its sender, which ends the next stage once the
//! queue is drained. The counter runs on the caller's thread and is the only
//! step that waits for the whole stream.

use crate::{
    chunker::Chunks,
    config::PipelineConfig,
    counter::{FrequencyTable, Ranking},
    error::{PipelineError, Result, Stage},
    normalizer::Normalizer,
    scanner::{ScanSummary, SourceFailure, SourceScanner},
    source::Source,
    types::{Chunk, Count, Token, Word},
};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

/// Item counts for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipelineStats {
    /// Sources scanned
    pub sources: usize,
    /// Bytes read across all sources
    pub bytes_read: u64,
    /// Words produced by the scanner
    pub words: u64,
    /// Tokens produced by the normalizer
    pub tokens: u64,
    /// Chunks produced by the chunker
    pub chunks: u64,
}

/// Result of joining a [`Stream`]
#[derive(Debug, Default)]
pub struct StreamSummary {
    /// Item counts
    pub stats: PipelineStats,
    /// Sources abandoned after a read error
    pub failures: Vec<SourceFailure>,
}

/// Output of a full run: ranked chunks plus what was read
#[derive(Debug)]
pub struct Report {
    /// Every distinct chunk, most frequent first
    pub ranking: Ranking,
    /// Item counts
    pub stats: PipelineStats,
    /// Sources abandoned after a read error
    pub failures: Vec<SourceFailure>,
}

impl Report {
    /// The `n` most frequent chunks
    pub fn top(&self, n: usize) -> &[Count] {
        self.ranking.top(n)
    }

    /// Whether no chunk was produced
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Whether any source produced at least one byte
    pub fn has_input(&self) -> bool {
        self.stats.bytes_read > 0
    }
}

#[derive(Debug)]
struct StageHandles {
    scanner: JoinHandle<ScanSummary>,
    normalizer: JoinHandle<u64>,
    chunker: Option<JoinHandle<u64>>,
}

impl StageHandles {
    fn join(self) -> Result<StreamSummary> {
        let scan = join_stage(Stage::Scanner, self.scanner)?;
        let tokens = join_stage(Stage::Normalizer, self.normalizer)?;
        let chunks = match self.chunker {
            Some(handle) => join_stage(Stage::Chunker, handle)?,
            None => 0,
        };

        Ok(StreamSummary {
            stats: PipelineStats {
                sources: scan.sources,
                bytes_read: scan.bytes_read,
                words: scan.words,
                tokens,
                chunks,
            },
            failures: scan.failures,
        })
    }
}

/// Live output of a running pipeline
///
/// Iterating yields items as the last stage produces them. Call
/// [`finish`](Self::finish) to join the stage threads and collect counts and
/// source failures; dropping the stream without finishing detaches them.
#[derive(Debug)]
pub struct Stream<T> {
    items: Receiver<T>,
    stages: StageHandles,
}

impl<T> Stream<T> {
    /// Stop reading and join every stage
    ///
    /// Unread items are discarded; upstream stages stop at their next send.
    pub fn finish(self) -> Result<StreamSummary> {
        let Stream { items, stages } = self;
        drop(items);
        stages.join()
    }
}

impl<T> Iterator for Stream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.recv().ok()
    }
}

/// Builds and runs threaded pipelines
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Pipeline with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with a custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Start scanner and normalizer; iterate the resulting tokens
    pub fn tokens(&self, sources: Vec<Source>) -> Result<Stream<Token>> {
        let (words, scanner) = self.spawn_scanner(sources)?;
        let (tokens, normalizer) = self.spawn_stage(Stage::Normalizer, words, Normalizer::new)?;

        Ok(Stream {
            items: tokens,
            stages: StageHandles {
                scanner,
                normalizer,
                chunker: None,
            },
        })
    }

    /// Start scanner, normalizer and chunker; iterate the resulting chunks
    pub fn chunks(&self, sources: Vec<Source>) -> Result<Stream<Chunk>> {
        let (words, scanner) = self.spawn_scanner(sources)?;
        let (tokens, normalizer) = self.spawn_stage(Stage::Normalizer, words, Normalizer::new)?;
        let (chunks, chunker) = self.spawn_stage(Stage::Chunker, tokens, Chunks::new)?;

        Ok(Stream {
            items: chunks,
            stages: StageHandles {
                scanner,
                normalizer,
                chunker: Some(chunker),
            },
        })
    }

    /// Run the whole pipeline and rank the chunks
    ///
    /// Blocks until every source is exhausted.
    pub fn run(&self, sources: Vec<Source>) -> Result<Report> {
        log::debug!(
            "running pipeline over {} source(s), channel capacity {}",
            sources.len(),
            self.config.channel_capacity()
        );

        let mut stream = self.chunks(sources)?;
        let table: FrequencyTable = stream.by_ref().collect();
        let summary = stream.finish()?;

        log::debug!(
            "counted {} chunk(s), {} distinct",
            table.total(),
            table.len()
        );

        Ok(Report {
            ranking: table.into_ranking(),
            stats: summary.stats,
            failures: summary.failures,
        })
    }

    fn spawn_scanner(
        &self,
        sources: Vec<Source>,
    ) -> Result<(Receiver<Word>, JoinHandle<ScanSummary>)> {
        let (tx, rx) = mpsc::sync_channel(self.config.channel_capacity());
        let handle = spawn_thread(Stage::Scanner, move || {
            let mut scanner = SourceScanner::new(sources);
            forward(Stage::Scanner, scanner.by_ref(), tx);
            scanner.into_summary()
        })?;
        Ok((rx, handle))
    }

    fn spawn_stage<I, O, F, J>(
        &self,
        stage: Stage,
        input: Receiver<I>,
        adapt: F,
    ) -> Result<(Receiver<O>, JoinHandle<u64>)>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: FnOnce(mpsc::IntoIter<I>) -> J + Send + 'static,
        J: Iterator<Item = O>,
    {
        let (tx, rx) = mpsc::sync_channel(self.config.channel_capacity());
        let handle = spawn_thread(stage, move || forward(stage, adapt(input.into_iter()), tx))?;
        Ok((rx, handle))
    }
}

fn spawn_thread<T, F>(stage: Stage, body: F) -> Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new()
        .name(format!("wordchunk-{stage}"))
        .spawn(body)
        .map_err(|source| PipelineError::Spawn { stage, source })
}

fn join_stage<T>(stage: Stage, handle: JoinHandle<T>) -> Result<T> {
    handle
        .join()
        .map_err(|_| PipelineError::StageFailed { stage })
}

/// Push every item downstream; the sender is dropped on return
fn forward<T>(stage: Stage, items: impl Iterator<Item = T>, tx: SyncSender<T>) -> u64 {
    let mut sent = 0;
    for item in items {
        if tx.send(item).is_err() {
            log::debug!("{stage} stage: downstream closed, stopping");
            break;
        }
        sent += 1;
    }
    log::debug!("{stage} stage done, {sent} item(s) sent");
    sent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, body: &str) -> Source {
        Source::from_text(name, body)
    }

    #[test]
    fn test_run_counts_repeated_chunks() {
        let report = Pipeline::new()
            .run(vec![text("input", "a b c a b c a")])
            .unwrap();

        let top: Vec<(usize, String)> = report
            .top(2)
            .iter()
            .map(|c| (c.count, c.chunk.to_string()))
            .collect();
        assert_eq!(
            top,
            vec![(2, "a b c".to_string()), (2, "b c a".to_string())]
        );
        assert_eq!(report.ranking.len(), 3);
        assert_eq!(report.stats.chunks, 5);
        assert_eq!(report.stats.tokens, 7);
        assert_eq!(report.stats.words, 7);
        assert_eq!(report.stats.sources, 1);
    }

    #[test]
    fn test_tokens_stream() {
        let mut stream = Pipeline::new()
            .tokens(vec![text("input", "'Lorem' IPSUM *** am-et")])
            .unwrap();
        let tokens: Vec<String> = stream.by_ref().map(Token::into_string).collect();
        assert_eq!(tokens, vec!["lorem", "ipsum", "am-et"]);

        let summary = stream.finish().unwrap();
        assert_eq!(summary.stats.words, 4);
        assert_eq!(summary.stats.tokens, 3);
        assert_eq!(summary.stats.chunks, 0);
    }

    #[test]
    fn test_chunks_stream() {
        let stream = Pipeline::new()
            .chunks(vec![text("input", "lorem ipsum dolor sit amet")])
            .unwrap();
        let chunks: Vec<String> = stream.map(|c| c.to_string()).collect();
        assert_eq!(
            chunks,
            vec!["lorem ipsum dolor", "ipsum dolor sit", "dolor sit amet"]
        );
    }

    #[test]
    fn test_rendezvous_queues() {
        let config = PipelineConfig::builder().channel_capacity(0).build().unwrap();
        let report = Pipeline::with_config(config)
            .run(vec![text("input", "one two three four one two three")])
            .unwrap();
        assert_eq!(report.top(1)[0].count, 2);
        assert_eq!(report.top(1)[0].chunk.to_string(), "one two three");
    }

    #[test]
    fn test_chunks_span_source_boundaries() {
        let report = Pipeline::new()
            .run(vec![text("first", "lorem ipsum"), text("second", "dolor")])
            .unwrap();
        assert_eq!(report.ranking.len(), 1);
        assert_eq!(report.top(1)[0].chunk.to_string(), "lorem ipsum dolor");
    }

    #[test]
    fn test_no_sources_is_empty_report() {
        let report = Pipeline::new().run(Vec::new()).unwrap();
        assert!(report.is_empty());
        assert!(!report.has_input());
        assert_eq!(report.stats, PipelineStats::default());
    }

    #[test]
    fn test_short_input_has_input_but_no_chunks() {
        let report = Pipeline::new().run(vec![text("input", "lorem ipsum")]).unwrap();
        assert!(report.is_empty());
        assert!(report.has_input());
    }

    #[test]
    fn test_finish_early_does_not_hang() {
        let body = "w ".repeat(10_000);
        let config = PipelineConfig::builder().channel_capacity(1).build().unwrap();
        let mut stream = Pipeline::with_config(config)
            .chunks(vec![text("input", &body)])
            .unwrap();
        assert!(stream.next().is_some());

        let summary = stream.finish().unwrap();
        assert!(summary.stats.chunks < 9_998);
    }
}
