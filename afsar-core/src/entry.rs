//! The packed structs represent the on-disk format of afsar

use core::fmt::Display;

use alloc::string::String;
use bytemuck::{Pod, Zeroable};

use crate::{Error, Timestamp, NAME_SIZE};

/// One record of the entry table at offset 0x8: where a file's data lives
/// in the stream. Names and timestamps are kept apart, in the file-info
/// table.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(packed, C)]
pub struct TableEntry {
    /// Absolute offset of the file data from the start of the stream
    pub offset: u32,
    /// Size in bytes of the file data
    pub size: u32,
}

impl TableEntry {
    pub fn new(offset: u32, size: u32) -> TableEntry {
        TableEntry {
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
}

impl Display for TableEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "offset={:#x} size={}", self.offset(), self.size())
    }
}

/// One record of the file-info table: the name and timestamp for the entry
/// at the same index of the entry table, plus the data length again.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(packed, C)]
pub struct FileInfo {
    /// NUL-padded ASCII file name
    pub name: [u8; NAME_SIZE],
    /// Last-modified time of the file
    pub timestamp: Timestamp,
    /// Length of the file data, always equal to the table entry's size
    pub size: u32,
}

impl FileInfo {
    /// Retrieve the name, ending at the first NUL
    pub fn name_bytes(&self) -> &[u8] {
        let mut i = 0;
        while i < self.name.len() {
            if self.name[i] == 0 {
                break;
            }
            i += 1;
        }
        &self.name[..i]
    }

    /// Retrieve the name as a string. Names are strictly ASCII on disk.
    pub fn name(&self) -> Result<&str, Error> {
        let bytes = self.name_bytes();
        if !bytes.is_ascii() {
            return Err(Error::NonAsciiName);
        }
        core::str::from_utf8(bytes).map_err(|_| Error::NonAsciiName)
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn size(&self) -> u32 {
        u32::from_le(self.size)
    }

    /// Check the recorded length against the entry table. The two are
    /// written from the same value, so a mismatch means the archive is
    /// structurally inconsistent.
    pub fn verify(&self, table_entry: &TableEntry) -> Result<(), Error> {
        if self.size() != table_entry.size() {
            return Err(Error::LengthMismatch {
                expected: table_entry.size(),
                actual: self.size(),
            });
        }
        Ok(())
    }
}

impl Display for FileInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let timestamp = self.timestamp();
        write!(
            f,
            "name={:?} timestamp={} size={}",
            String::from_utf8_lossy(self.name_bytes()),
            timestamp,
            self.size(),
        )
    }
}
