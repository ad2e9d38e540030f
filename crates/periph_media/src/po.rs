//! ProDOS-ordered (`.po`) disk images.
//!
//! A `.po` image is raw block data with no header: 512-byte blocks stored in
//! ProDOS order. Mounting only has to validate that the file is a whole
//! number of blocks.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::{BlockMedia, MediaError};

pub const BLOCK_SIZE: usize = 512;

/// Sentinel for "no position cached".
const NO_BLOCK: u32 = u32::MAX;

/// A mounted ProDOS-ordered image.
///
/// Sequential access dominates on the bus, so the last accessed block is
/// cached and the seek is skipped when the next request continues where the
/// previous one ended.
#[derive(Debug)]
pub struct PoMedia {
    file: File,
    num_blocks: u32,
    last_block: u32,
}

impl PoMedia {
    /// Mount an image file of `disk_size` bytes. Fails when the size is not
    /// a whole number of blocks.
    pub fn mount(file: File, disk_size: u64) -> Result<Self, MediaError> {
        if disk_size == 0 || disk_size % BLOCK_SIZE as u64 != 0 {
            return Err(MediaError::UnevenImage { size: disk_size });
        }
        let num_blocks = (disk_size / BLOCK_SIZE as u64) as u32;
        log::debug!("mounted po image, {} blocks", num_blocks);
        Ok(Self {
            file,
            num_blocks,
            last_block: NO_BLOCK,
        })
    }

    /// Create a blank image of `num_blocks` zero-filled blocks in `file`.
    pub fn create(file: &mut File, num_blocks: u32) -> Result<(), MediaError> {
        file.seek(SeekFrom::Start(0))?;
        let zeros = [0u8; BLOCK_SIZE];
        for _ in 0..num_blocks {
            file.write_all(&zeros)?;
        }
        file.flush()?;
        Ok(())
    }

    /// Drop the cached position, forcing the next access to seek. Called
    /// after anything else touches the file offset.
    pub fn reset_seek_cache(&mut self) {
        self.last_block = NO_BLOCK;
    }

    fn seek_to(&mut self, block: u32) -> Result<(), MediaError> {
        if block >= self.num_blocks {
            return Err(MediaError::BlockOutOfRange {
                block,
                count: self.num_blocks,
            });
        }
        if self.last_block == NO_BLOCK || block != self.last_block.wrapping_add(1) {
            self.file
                .seek(SeekFrom::Start(u64::from(block) * BLOCK_SIZE as u64))?;
        }
        Ok(())
    }
}

impl BlockMedia for PoMedia {
    fn read(&mut self, block: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<(), MediaError> {
        self.seek_to(block)?;
        if let Err(e) = self.file.read_exact(buf) {
            self.reset_seek_cache();
            return Err(e.into());
        }
        self.last_block = block;
        Ok(())
    }

    fn write(&mut self, block: u32, buf: &[u8; BLOCK_SIZE]) -> Result<(), MediaError> {
        self.seek_to(block)?;
        if let Err(e) = self.file.write_all(buf) {
            self.reset_seek_cache();
            return Err(e.into());
        }
        self.last_block = block;
        Ok(())
    }

    fn format(&mut self) -> Result<(), MediaError> {
        log::debug!("formatting po image, {} blocks", self.num_blocks);
        self.file.seek(SeekFrom::Start(0))?;
        let zeros = [0u8; BLOCK_SIZE];
        for _ in 0..self.num_blocks {
            self.file.write_all(&zeros)?;
        }
        self.file.flush()?;
        self.reset_seek_cache();
        Ok(())
    }

    fn block_count(&self) -> u32 {
        self.num_blocks
    }

    fn status(&self) -> bool {
        true
    }
}
