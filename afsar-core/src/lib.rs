#![no_std]
extern crate alloc;

use core::mem;

pub use crate::archive::ArchiveSrc;
pub use crate::entry::{FileInfo, TableEntry};
pub use crate::error::Error;
pub use crate::header::{FileInfoPointer, Header};
pub use crate::timestamp::Timestamp;

mod archive;
mod entry;
mod error;
mod header;
mod timestamp;

/// Magic bytes at the start of every archive.
pub const MAGIC: [u8; 4] = *b"AFS\0";

/// Width of the NUL-padded name field in a file-info record.
pub const NAME_SIZE: usize = 32;

pub const HEADER_SIZE: usize = mem::size_of::<Header>();
pub const TABLE_ENTRY_SIZE: usize = mem::size_of::<TableEntry>();
pub const TIMESTAMP_SIZE: usize = mem::size_of::<Timestamp>();
pub const FILE_INFO_SIZE: usize = mem::size_of::<FileInfo>();

/// Offset where entry data begins in archives produced by this codec.
/// The region between the entry table and this offset is reserved.
pub const DATA_OFFSET: u64 = 0x80000;

/// Fixed location of the (offset, size) pointer to the file-info table.
pub const FILE_INFO_POINTER: u64 = DATA_OFFSET - 8;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::mem;

    use crate::{
        Error, FileInfo, Header, TableEntry, Timestamp, FILE_INFO_SIZE, HEADER_SIZE,
        TABLE_ENTRY_SIZE, TIMESTAMP_SIZE,
    };

    #[test]
    fn header_size() {
        assert_eq!(mem::size_of::<Header>(), 8);
        assert_eq!(HEADER_SIZE, 8);
    }

    #[test]
    fn table_entry_size() {
        assert_eq!(mem::size_of::<TableEntry>(), 8);
        assert_eq!(TABLE_ENTRY_SIZE, 8);
    }

    #[test]
    fn timestamp_size() {
        assert_eq!(mem::size_of::<Timestamp>(), 12);
        assert_eq!(TIMESTAMP_SIZE, 12);
    }

    #[test]
    fn file_info_size() {
        assert_eq!(mem::size_of::<FileInfo>(), 48);
        assert_eq!(FILE_INFO_SIZE, 48);
    }

    #[test]
    fn header_parse() {
        let header = Header::new(b"AFS\x00\x02\x00\x00\x00").unwrap();
        assert_eq!(header.count(), 2);

        match Header::new(b"BFS\x00\x02\x00\x00\x00") {
            Err(Error::InvalidMagic(magic)) => assert_eq!(&magic, b"BFS\x00"),
            other => panic!("expected InvalidMagic, got {:?}", other),
        }
    }

    #[test]
    fn table_entry_little_endian() {
        let entry: &TableEntry =
            bytemuck::from_bytes(b"\x10\x00\x00\x00\x03\x00\x00\x00");
        assert_eq!(entry.offset(), 0x10);
        assert_eq!(entry.size(), 3);

        let built = TableEntry::new(0x80000, 2048);
        assert_eq!(bytemuck::bytes_of(&built), b"\x00\x00\x08\x00\x00\x08\x00\x00");
    }

    #[test]
    fn name_trimming() {
        let mut info = FileInfo {
            name: [0; 32],
            timestamp: Timestamp::EPOCH,
            size: 0,
        };
        info.name[..5].copy_from_slice(b"a.txt");
        assert_eq!(info.name_bytes(), b"a.txt");
        assert_eq!(info.name().unwrap(), "a.txt");

        // A full 32-byte name has no NUL terminator at all.
        info.name = [b'x'; 32];
        assert_eq!(info.name_bytes().len(), 32);
    }

    #[test]
    fn non_ascii_name() {
        let mut info = FileInfo {
            name: [0; 32],
            timestamp: Timestamp::EPOCH,
            size: 0,
        };
        info.name[0] = 0xFF;
        match info.name() {
            Err(Error::NonAsciiName) => {}
            other => panic!("expected NonAsciiName, got {:?}", other),
        }
    }

    #[test]
    fn verify_length() {
        let info = FileInfo {
            name: [0; 32],
            timestamp: Timestamp::EPOCH,
            size: 4u32.to_le(),
        };
        assert!(info.verify(&TableEntry::new(0x80000, 4)).is_ok());
        match info.verify(&TableEntry::new(0x80000, 5)) {
            Err(Error::LengthMismatch { expected, actual }) => {
                assert_eq!(expected, 5);
                assert_eq!(actual, 4);
            }
            other => panic!("expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn timestamp_display() {
        let timestamp = Timestamp::new(2021, 6, 15, 12, 30, 45);
        assert_eq!(timestamp.to_string(), "2021-06-15 12:30:45");
        assert_eq!(Timestamp::default(), Timestamp::EPOCH);
        assert_eq!(Timestamp::EPOCH.to_string(), "1970-01-01 00:00:00");
    }
}
