mod cursor;
mod document;

pub use cursor::{Cursor, NibbleHalf};
pub use document::{Document, NEW_FILE_SIZE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("Error: New buffer size must be greater than 0.")]
    InvalidSize(usize),
    #[error("offset {offset} out of bounds (length {len})")]
    OutOfBounds { offset: usize, len: usize },
    #[error("Error: Couldn't allocate {0} bytes")]
    OutOfMemory(usize),
    #[error("No file path set")]
    NoPath,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
