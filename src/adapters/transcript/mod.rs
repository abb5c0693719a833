//! Transcript sink adapters.

mod file;

pub use file::FileTranscriptSink;
