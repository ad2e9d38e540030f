//! PDF output for the peripheral print emulators.
//!
//! [`PdfDocument`] is the concrete page sink: it renders the interpreter's
//! sink calls into per-page PDF content streams and assembles the document
//! (objects, xref, trailer) when finished. [`PrintSession`] glues an
//! interpreter to a document and feeds it transport frames.

mod document;
mod errors;
mod session;

pub use document::PdfDocument;
pub use errors::PdfError;
pub use session::PrintSession;
