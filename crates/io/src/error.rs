use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoError {
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("{count} trailing bytes after the end of the value")]
    TrailingBytes { count: usize },
}

impl IoError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn end_of_stream(entity: &str) -> Self {
        Self::UnexpectedEof(entity.to_string())
    }
}

pub type IoResult<T> = Result<T, IoError>;
