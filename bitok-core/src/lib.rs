//! Sentence splitting and tokenization stage for parallel-corpus pipelines
//!
//! Reads base64-encoded documents one per line, splits them into sentences,
//! drops sentences that are mostly punctuation or digits, runs the survivors
//! through an external word tokenizer (and optionally a morphological
//! analyser) and writes two line-aligned, base64-encoded xz streams:
//!
//! - the filtered sentences, one document per line, original case;
//! - the tokenized text of the same sentences, lower-cased.
//!
//! ```no_run
//! use bitok_core::{Pipeline, PipelineConfig, SplitterSpec};
//!
//! let splitter = SplitterSpec::parse("sent_tokenize() english")?;
//! let config = PipelineConfig::new("docs.b64.xz", splitter, "moses-tokenizer en");
//! let stats = Pipeline::new(config)?.run()?;
//! println!("{} documents written", stats.records_written);
//! # Ok::<(), bitok_core::PipelineError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod external;
pub mod filter;
pub mod io;
pub mod language;
pub mod pipeline;
pub mod splitter;
pub mod tokenizer;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use external::ExternalProcessor;
pub use filter::{filter_sentences, keep, FilterOutcome};
pub use language::SentenceModel;
pub use pipeline::{decode_record, encode_blob, EncodedPair, Pipeline, RecordProcessor, RunStats};
pub use splitter::{SentenceSplitter, SplitterSpec};
pub use tokenizer::TokenizerPipeline;
