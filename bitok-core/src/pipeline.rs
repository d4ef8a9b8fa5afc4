//! Record pipeline driver
//!
//! Every input line is one record: a base64 text blob. A record goes through
//! decode, split, filter, tokenize and encode, and then either yields one line
//! in each output stream or is skipped in both.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::filter::filter_sentences;
use crate::io::{open_input, PairWriter, RecordSink};
use crate::splitter::SentenceSplitter;
use crate::tokenizer::TokenizerPipeline;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Serialize;

/// The two encoded lines produced for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPair {
    /// base64 of the filtered sentences, original case
    pub sentences: String,
    /// base64 of the tokenized, lower-cased text
    pub tokenized: String,
}

/// Outcome of processing one decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedRecord {
    /// Output lines, `None` when the record is skipped
    pub pair: Option<EncodedPair>,
    /// Sentences that passed the filter
    pub kept: usize,
    /// Sentences the filter dropped
    pub dropped: usize,
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Input lines read
    pub records_read: u64,
    /// Pairs written
    pub records_written: u64,
    /// Records with no surviving output
    pub records_skipped: u64,
    /// Sentences kept across all records
    pub sentences_kept: u64,
    /// Sentences dropped across all records
    pub sentences_dropped: u64,
}

/// Decode one input line into record text
///
/// `line_number` is 1-based and only used for error reporting.
pub fn decode_record(line: &[u8], line_number: u64) -> Result<String> {
    let bytes = BASE64_STANDARD
        .decode(line.trim_ascii())
        .map_err(|e| PipelineError::InputDecoding {
            line: line_number,
            reason: format!("invalid base64: {e}"),
        })?;
    let text = String::from_utf8(bytes).map_err(|e| PipelineError::InputDecoding {
        line: line_number,
        reason: format!("invalid UTF-8: {e}"),
    })?;
    Ok(text.replace('\t', " "))
}

/// base64-encode a text blob
pub fn encode_blob(text: &str) -> String {
    BASE64_STANDARD.encode(text.as_bytes())
}

/// Per-record stages: split, filter, tokenize, encode
pub struct RecordProcessor {
    splitter: Box<dyn SentenceSplitter>,
    tokenizer: TokenizerPipeline,
}

impl std::fmt::Debug for RecordProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordProcessor")
            .field("splitter", &self.splitter.describe())
            .field("tokenizer", &self.tokenizer)
            .finish()
    }
}

impl RecordProcessor {
    /// Combine a splitter and a tokenizer pipeline
    pub fn new(splitter: Box<dyn SentenceSplitter>, tokenizer: TokenizerPipeline) -> Self {
        Self {
            splitter,
            tokenizer,
        }
    }

    /// Process one decoded record
    pub fn process(&self, text: &str) -> Result<ProcessedRecord> {
        let sentences = self.splitter.split(text)?;
        let filtered = filter_sentences(&sentences);
        if filtered.is_empty() {
            return Ok(ProcessedRecord {
                pair: None,
                kept: 0,
                dropped: filtered.dropped,
            });
        }

        let tokenized = self.tokenizer.tokenize(&filtered.text)?;
        let pair = (!tokenized.is_empty()).then(|| EncodedPair {
            sentences: encode_blob(&filtered.text),
            tokenized: encode_blob(&tokenized),
        });

        Ok(ProcessedRecord {
            pair,
            kept: filtered.kept,
            dropped: filtered.dropped,
        })
    }

    /// Drive every line of `lines` into `sink`, in input order
    ///
    /// `on_record` sees the running counters after each record. The first
    /// error aborts the stream; the sink is left to its owner to finish.
    pub fn process_stream<I, S, F>(
        &self,
        lines: I,
        sink: &mut S,
        mut on_record: F,
    ) -> Result<RunStats>
    where
        I: IntoIterator<Item = Result<Vec<u8>>>,
        S: RecordSink + ?Sized,
        F: FnMut(&RunStats),
    {
        let mut stats = RunStats::default();

        for line in lines {
            let line = line?;
            stats.records_read += 1;

            let text = decode_record(&line, stats.records_read)?;
            let record = self.process(&text)?;
            stats.sentences_kept += record.kept as u64;
            stats.sentences_dropped += record.dropped as u64;

            match record.pair {
                Some(pair) => {
                    sink.write_pair(&pair)?;
                    stats.records_written += 1;
                }
                None => {
                    log::debug!("record {} produced no output", stats.records_read);
                    stats.records_skipped += 1;
                }
            }

            on_record(&stats);
        }

        Ok(stats)
    }
}

/// A configured run from an input file to two xz outputs
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    processor: RecordProcessor,
}

impl Pipeline {
    /// Resolve splitter and tokenizer once for the whole run
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let splitter = config
            .splitter
            .build(&config.fallback_language, config.timeout)?;
        let tokenizer = TokenizerPipeline::from_commands(
            &config.word_tokenizer,
            config.morph_analyser.as_deref(),
            config.timeout,
        )?;

        log::info!("Sentence splitter: {}", splitter.describe());
        log::info!("Tokenizer: {}", tokenizer.describe());

        Ok(Self {
            config,
            processor: RecordProcessor::new(splitter, tokenizer),
        })
    }

    /// The configuration this pipeline was built from
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The per-record stages
    pub fn processor(&self) -> &RecordProcessor {
        &self.processor
    }

    /// Run over the configured input and write both outputs
    pub fn run(&self) -> Result<RunStats> {
        self.run_observed(|_| {})
    }

    /// Like [`run`](Self::run), reporting progress after every record
    pub fn run_observed<F: FnMut(&RunStats)>(&self, on_record: F) -> Result<RunStats> {
        let reader = open_input(&self.config.text)?;
        let mut writer = PairWriter::create(
            &self.config.sentences_output,
            &self.config.tokenized_output,
            self.config.compression_level,
        )?;

        // close both streams even when a record fails
        let result = self.processor.process_stream(reader, &mut writer, on_record);
        let finished = writer.finish();
        let stats = result?;
        finished?;

        log::info!(
            "Processed {} records: {} written, {} skipped ({} sentences kept, {} dropped)",
            stats.records_read,
            stats.records_written,
            stats.records_skipped,
            stats.sentences_kept,
            stats.sentences_dropped
        );
        Ok(stats)
    }
}
