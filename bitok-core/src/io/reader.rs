//! Line reader over plain, gzip or xz input

use crate::error::{PipelineError, Result};
use flate2::bufread::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use xz2::bufread::XzDecoder;

const XZ_MAGIC: &[u8] = &[0xFD, b'7', b'z', b'X', b'Z', 0x00];
const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];

/// Compression scheme of an input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Uncompressed text
    Plain,
    /// gzip, possibly several concatenated members
    Gzip,
    /// xz, possibly several concatenated streams
    Xz,
}

impl Compression {
    /// Guess from the file extension
    pub fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xz") => Compression::Xz,
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::Plain,
        }
    }
}

/// Detect the compression scheme from the first bytes of a stream
pub fn detect_compression(header: &[u8]) -> Compression {
    if header.starts_with(XZ_MAGIC) {
        Compression::Xz
    } else if header.starts_with(GZIP_MAGIC) {
        Compression::Gzip
    } else {
        Compression::Plain
    }
}

/// Open `path` for line reading, whatever its compression
///
/// The path `-` reads standard input.
pub fn open_input(path: &Path) -> Result<LineReader> {
    if path.as_os_str() == "-" {
        return LineReader::detect(io::stdin().lock(), None);
    }
    let file = File::open(path).map_err(|e| PipelineError::file(path, e))?;
    LineReader::detect(file, Some(path)).map_err(|e| match e {
        PipelineError::Io(source) => PipelineError::file(path, source),
        other => other,
    })
}

/// Lazy iterator over the byte lines of a stream
///
/// Line terminators (`\n` or `\r\n`) are removed. The iterator is finite and
/// cannot be restarted.
pub struct LineReader {
    inner: Box<dyn BufRead>,
    compression: Compression,
}

impl std::fmt::Debug for LineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("compression", &self.compression)
            .finish_non_exhaustive()
    }
}

impl LineReader {
    /// Wrap an already decompressed stream
    pub fn new<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            inner: Box::new(reader),
            compression: Compression::Plain,
        }
    }

    /// Sniff the magic number of `reader` and decompress accordingly
    ///
    /// When the stream is too short to carry a magic number, `hint` (the
    /// originating path) decides by extension. Empty streams are plain.
    pub fn detect<R: Read + 'static>(mut reader: R, hint: Option<&Path>) -> Result<Self> {
        let header = read_header(&mut reader, XZ_MAGIC.len())?;

        let compression = if header.is_empty() {
            Compression::Plain
        } else if header.len() < XZ_MAGIC.len() && detect_compression(&header) == Compression::Plain {
            hint.map(Compression::from_extension)
                .unwrap_or(Compression::Plain)
        } else {
            detect_compression(&header)
        };
        log::debug!("input compression: {compression:?}");

        // put the sniffed bytes back in front of the rest of the stream
        let buffered = BufReader::new(io::Cursor::new(header).chain(reader));

        let inner: Box<dyn BufRead> = match compression {
            Compression::Plain => Box::new(buffered),
            Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(buffered))),
            Compression::Xz => Box::new(BufReader::new(XzDecoder::new_multi_decoder(buffered))),
        };

        Ok(Self { inner, compression })
    }

    /// The detected compression scheme
    pub fn compression(&self) -> Compression {
        self.compression
    }
}

/// Read up to `len` bytes, stopping early only at end of stream
///
/// Pipes may deliver the magic number across several reads.
fn read_header<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut header = vec![0; len];
    let mut filled = 0;
    while filled < len {
        match reader.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    header.truncate(filled);
    Ok(header)
}

impl Iterator for LineReader {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        match self.inner.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                    if line.last() == Some(&b'\r') {
                        line.pop();
                    }
                }
                Some(Ok(line))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
