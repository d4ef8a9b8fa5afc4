//! Output streams for the sentence and tokenized files

use crate::error::{PipelineError, Result};
use crate::pipeline::EncodedPair;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use xz2::write::XzEncoder;

/// Default xz preset, same as the `xz` command line tool
pub const DEFAULT_XZ_LEVEL: u32 = 6;

/// xz-compressed file output
pub type XzOutput = XzEncoder<BufWriter<File>>;

/// Create (truncating) an xz-compressed output file
pub fn create_xz_output(path: &Path, level: u32) -> Result<XzOutput> {
    if level > 9 {
        return Err(PipelineError::Config(format!(
            "xz compression level must be between 0 and 9, got {level}"
        )));
    }
    let file = File::create(path).map_err(|e| PipelineError::file(path, e))?;
    Ok(XzEncoder::new(BufWriter::new(file), level))
}

/// A byte sink that needs an explicit end-of-stream step
pub trait OutputStream: Write {
    /// Flush everything and write any trailer
    fn finish_stream(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<W: Write> OutputStream for XzEncoder<W> {
    fn finish_stream(&mut self) -> io::Result<()> {
        self.try_finish()?;
        self.get_mut().flush()
    }
}

impl OutputStream for Vec<u8> {}

impl OutputStream for File {}

impl<W: Write> OutputStream for BufWriter<W> {}

/// Destination for encoded output pairs
pub trait RecordSink {
    /// Append one pair; both halves land on the same line number
    fn write_pair(&mut self, pair: &EncodedPair) -> Result<()>;

    /// Finalize output, returning the number of pairs written
    fn finish(&mut self) -> Result<u64>;
}

/// Two line-aligned output streams
///
/// Dropping an unfinished writer still ends each xz stream, so whatever was
/// written before an error stays decodable.
#[derive(Debug)]
pub struct PairWriter<W: OutputStream> {
    sentences: W,
    tokenized: W,
    lines: u64,
}

impl<W: OutputStream> PairWriter<W> {
    /// Pair up the sentences stream and the tokenized stream
    pub fn new(sentences: W, tokenized: W) -> Self {
        Self {
            sentences,
            tokenized,
            lines: 0,
        }
    }

    /// Number of pairs written so far
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Give back both streams
    pub fn into_inner(self) -> (W, W) {
        (self.sentences, self.tokenized)
    }
}

impl PairWriter<XzOutput> {
    /// Open both xz output files
    pub fn create(sentences: &Path, tokenized: &Path, level: u32) -> Result<Self> {
        Ok(Self::new(
            create_xz_output(sentences, level)?,
            create_xz_output(tokenized, level)?,
        ))
    }
}

impl<W: OutputStream> RecordSink for PairWriter<W> {
    fn write_pair(&mut self, pair: &EncodedPair) -> Result<()> {
        self.sentences.write_all(pair.sentences.as_bytes())?;
        self.sentences.write_all(b"\n")?;
        self.tokenized.write_all(pair.tokenized.as_bytes())?;
        self.tokenized.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<u64> {
        self.sentences.finish_stream()?;
        self.tokenized.finish_stream()?;
        Ok(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use xz2::read::XzDecoder;

    fn pair(sentences: &str, tokenized: &str) -> EncodedPair {
        EncodedPair {
            sentences: sentences.to_string(),
            tokenized: tokenized.to_string(),
        }
    }

    fn read_xz(path: &Path) -> String {
        let mut text = String::new();
        XzDecoder::new(File::open(path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    #[test]
    fn test_pairs_stay_aligned() {
        let mut writer = PairWriter::new(Vec::new(), Vec::new());
        writer.write_pair(&pair("QQ==", "YQ==")).unwrap();
        writer.write_pair(&pair("Qg==", "Yg==")).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let (sentences, tokenized) = writer.into_inner();
        assert_eq!(sentences, b"QQ==\nQg==\n");
        assert_eq!(tokenized, b"YQ==\nYg==\n");
    }

    #[test]
    fn test_xz_files_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let sent = temp_dir.path().join("sent.xz");
        let tok = temp_dir.path().join("tok.xz");

        let mut writer = PairWriter::create(&sent, &tok, DEFAULT_XZ_LEVEL).unwrap();
        writer.write_pair(&pair("c2VudA==", "dG9r")).unwrap();
        writer.finish().unwrap();
        drop(writer);

        assert_eq!(read_xz(&sent), "c2VudA==\n");
        assert_eq!(read_xz(&tok), "dG9r\n");
    }

    #[test]
    fn test_dropped_writer_leaves_decodable_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let sent = temp_dir.path().join("sent.xz");
        let tok = temp_dir.path().join("tok.xz");

        {
            let mut writer = PairWriter::create(&sent, &tok, 1).unwrap();
            writer.write_pair(&pair("YQ==", "Yg==")).unwrap();
        }

        assert_eq!(read_xz(&sent), "YQ==\n");
        assert_eq!(read_xz(&tok), "Yg==\n");
    }

    #[test]
    fn test_empty_run_still_produces_valid_xz() {
        let temp_dir = TempDir::new().unwrap();
        let sent = temp_dir.path().join("sent.xz");
        let tok = temp_dir.path().join("tok.xz");

        let mut writer = PairWriter::create(&sent, &tok, DEFAULT_XZ_LEVEL).unwrap();
        assert_eq!(writer.finish().unwrap(), 0);
        drop(writer);

        assert_eq!(read_xz(&sent), "");
        assert_eq!(read_xz(&tok), "");
    }

    #[test]
    fn test_invalid_level_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x.xz");
        assert!(matches!(
            create_xz_output(&path, 12),
            Err(PipelineError::Config(_))
        ));
        assert!(!path.exists());
    }
}
