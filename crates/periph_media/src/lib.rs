//! Disk-image media and bus connector abstractions.
//!
//! [`BlockMedia`] is the interface the block device emulation reads and
//! writes through; [`PoMedia`] implements it over a ProDOS-ordered image
//! file. [`Connector`] and [`Connection`] describe the lifecycle of a
//! framed transport link; the crate ships no wire transport, only an
//! in-memory loopback.

mod connector;
mod errors;
mod po;

pub use connector::{Connection, Connector, LoopbackConnection};
pub use errors::{ConnectorError, MediaError};
pub use po::{PoMedia, BLOCK_SIZE};

/// Interface of a mounted block-addressable medium.
pub trait BlockMedia {
    /// Read one block into `buf`.
    fn read(&mut self, block: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<(), MediaError>;

    /// Write one block from `buf`.
    fn write(&mut self, block: u32, buf: &[u8; BLOCK_SIZE]) -> Result<(), MediaError>;

    /// Zero-fill the whole medium.
    fn format(&mut self) -> Result<(), MediaError>;

    fn block_count(&self) -> u32;

    /// True while the backing store is usable.
    fn status(&self) -> bool;
}
