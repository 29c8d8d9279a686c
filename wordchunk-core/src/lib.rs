//! Streaming word-chunk frequency analysis
//!
//! Text flows through four stages:
//!
//! 1. **Scanner**: splits byte streams into whitespace-delimited [`Word`]s
//! 2. **Normalizer**: trims non-letters and lower-cases into [`Token`]s
//! 3. **Chunker**: slides a window of [`CHUNK_SIZE`] tokens into [`Chunk`]s
//! 4. **Counter**: counts chunks and ranks them by frequency
//!
//! Each stage is a plain iterator adaptor, so the pipeline can be composed
//! on one thread. [`Pipeline`] runs the same adaptors on separate threads
//! joined by bounded queues.
//!
//! # Example
//!
//! ```rust
//! use wordchunk_core::{Pipeline, Source};
//!
//! let report = Pipeline::new()
//!     .run(vec![Source::from_text("example", "a b c a b c a")])
//!     .unwrap();
//!
//! let top = report.top(2);
//! assert_eq!(top[0].count, 2);
//! assert_eq!(top[0].chunk.to_string(), "a b c");
//! ```
//!
//! Single-threaded composition:
//!
//! ```rust
//! use wordchunk_core::{chunks, count_chunks, tokens, Word};
//!
//! let words = "Lorem ipsum dolor sit amet".split_whitespace().map(Word::from);
//! let table = count_chunks(chunks(tokens(words)));
//! assert_eq!(table.total(), 3);
//! ```

#![warn(missing_docs)]

pub mod chunker;
pub mod config;
pub mod counter;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod scanner;
pub mod source;
pub mod types;

pub use chunker::{chunks, ChunkWindow, Chunks, WindowState};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use counter::{count_chunks, FrequencyTable, Ranking};
pub use error::{PipelineError, Result, Stage};
pub use normalizer::{normalize, tokens, Normalizer};
pub use pipeline::{Pipeline, PipelineStats, Report, Stream, StreamSummary};
pub use scanner::{ScanSummary, SourceFailure, SourceScanner, WordScanner};
pub use source::Source;
pub use types::{Chunk, Count, Token, Word, CHUNK_SIZE};
