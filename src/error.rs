use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("saved state is truncated")]
    Truncated,
    #[error("saved state has unknown magic {0:?}")]
    BadMagic([u8; 4]),
    #[error("saved state belongs to component {found:?}, expected {expected:?}")]
    WrongTag { expected: char, found: char },
    #[error("saved label is not valid UTF-8")]
    InvalidLabel(#[from] std::string::FromUtf8Error),
    #[error("{0} trailing bytes after saved state")]
    TrailingBytes(usize),
    #[error("state field too large to encode: {0} bytes")]
    TooLarge(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record {index} has timestamp {time} outside the supported range")]
    TimeOutOfRange { index: usize, time: i64 },
}
