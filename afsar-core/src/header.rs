//! The packed structs represent the on-disk format of afsar

use bytemuck::{Pod, PodCastError, Zeroable};
use core::mem;

use crate::{Error, MAGIC, TABLE_ENTRY_SIZE};

/// Integer fields in all on-disk structs are stored little-endian; use the
/// accessor methods to read them.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(packed, C)]
pub struct Header {
    /// Magic bytes, always `"AFS\0"`
    pub magic: [u8; 4],
    /// Count of entries in the archive
    pub count: u32,
}

impl Header {
    /// Parse a header from raw header data and validate the magic
    pub fn new(data: &[u8]) -> Result<&Header, Error> {
        let header: &Header = bytemuck::try_from_bytes(
            data.get(..mem::size_of::<Header>())
                .ok_or(Error::Cast(PodCastError::SizeMismatch))?,
        )?;

        if header.magic != MAGIC {
            return Err(Error::InvalidMagic(header.magic));
        }

        Ok(header)
    }

    pub fn count(&self) -> u32 {
        u32::from_le(self.count)
    }

    /// Retrieve the size of the entry table that follows the header
    pub fn table_size(&self) -> Result<usize, Error> {
        (self.count() as usize)
            .checked_mul(TABLE_ENTRY_SIZE)
            .ok_or(Error::Overflow)
    }
}

/// The pointer slot at [`FILE_INFO_POINTER`](crate::FILE_INFO_POINTER)
/// locating the file-info table.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(packed, C)]
pub struct FileInfoPointer {
    /// Absolute offset of the file-info table, zero when the table is absent
    pub offset: u32,
    /// Size in bytes of the file-info table, before padding
    pub size: u32,
}

impl FileInfoPointer {
    pub fn new(offset: u32, size: u32) -> FileInfoPointer {
        FileInfoPointer {
            offset: offset.to_le(),
            size: size.to_le(),
        }
    }

    pub fn offset(&self) -> u32 {
        u32::from_le(self.offset)
    }

    pub fn size(&self) -> u32 {
        u32::from_le(self.size)
    }

    /// A zeroed offset means the archive carries no name or timestamp
    /// metadata at all.
    pub fn is_present(&self) -> bool {
        self.offset() != 0
    }
}
