//! Error types for avring-demo

use avring::RingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Ring error: {0}")]
    Ring(#[from] RingError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Writer thread panicked")]
    WriterPanicked,

    #[error("Reader {0} thread panicked")]
    ReaderPanicked(usize),
}

impl DemoError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DemoError::InvalidConfiguration(_) | DemoError::Ring(RingError::InvalidConfig(_)) => 4,
            DemoError::IoError(_) => 3,
            DemoError::WriterPanicked | DemoError::ReaderPanicked(_) => 2,
            DemoError::Ring(_) => 1,
        }
    }
}
