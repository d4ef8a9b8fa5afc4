//! Input and output streams

pub mod reader;
pub mod writer;

pub use reader::{detect_compression, open_input, Compression, LineReader};
pub use writer::{
    create_xz_output, OutputStream, PairWriter, RecordSink, XzOutput, DEFAULT_XZ_LEVEL,
};
