use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("error writing document: {0}")]
    Io(#[from] std::io::Error),
}
