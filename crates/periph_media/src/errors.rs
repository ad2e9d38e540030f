use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image size {size} is not a whole number of 512-byte blocks")]
    UnevenImage { size: u64 },

    #[error("block {block} out of range, media has {count} blocks")]
    BlockOutOfRange { block: u32, count: u32 },
}

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection is closed")]
    Closed,
}
