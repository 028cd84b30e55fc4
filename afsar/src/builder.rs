use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use afsar_core::{
    FileInfo, FileInfoPointer, Header, TableEntry, Timestamp, DATA_OFFSET, FILE_INFO_POINTER,
    HEADER_SIZE, MAGIC, NAME_SIZE,
};

use crate::{wrap_io_err, Error};

#[derive(Debug)]
struct BuilderEntry {
    name: String,
    timestamp: Timestamp,

    kind: BuilderEntryKind,
}

enum BuilderEntryKind {
    /// Path to a regular file, read at write time
    File(PathBuf),

    /// In-memory contents
    Data(Vec<u8>),

    /// An entry whose data has been written to the stream
    Written(TableEntry),
}

impl fmt::Debug for BuilderEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use BuilderEntryKind::*;
        match self {
            File(p) => write!(f, "BuilderEntryKind::File({:?})", p),
            Data(d) => write!(f, "BuilderEntryKind::Data({} bytes)", d.len()),
            Written(e) => write!(f, "BuilderEntryKind::Written({})", e),
        }
    }
}

/// Builder for AFS archives. Holds a list of entries in archive order and
/// consumes itself to write the stream.
///
/// Writing is a two-pass affair: the data segment goes out first, which is
/// when offsets become known, and the entry table and file-info pointer
/// are backfilled into the reserved header region afterwards.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use afsar::ArchiveBuilder;
/// use afsar_core::Timestamp;
///
/// let mut archive_dest = Cursor::new(Vec::new());
///
/// let mut builder = ArchiveBuilder::new(2048).unwrap();
/// builder
///     .data("hello.txt", Timestamp::new(2021, 1, 1, 0, 0, 0), b"hi".to_vec())
///     .unwrap();
///
/// builder.write_archive(&mut archive_dest).unwrap();
/// ```
pub struct ArchiveBuilder {
    padding: u32,

    entries: Vec<BuilderEntry>,
}

impl ArchiveBuilder {
    /// `padding` is the alignment boundary applied after every entry's
    /// data and after the file-info table. It must be a power of two;
    /// anything else fails here, before a single byte is written.
    pub fn new(padding: u32) -> Result<ArchiveBuilder, Error> {
        if !padding.is_power_of_two() {
            return Err(Error::InvalidPadding(padding));
        }
        Ok(ArchiveBuilder {
            padding,
            entries: Vec::new(),
        })
    }

    /// Add an entry from in-memory contents.
    pub fn data(
        &mut self,
        name: impl AsRef<str>,
        timestamp: Timestamp,
        data: Vec<u8>,
    ) -> Result<&mut ArchiveBuilder, Error> {
        let name = check_entry_name(name.as_ref())?;
        self.entries.push(BuilderEntry {
            name,
            timestamp,
            kind: BuilderEntryKind::Data(data),
        });
        Ok(self)
    }

    /// Add an entry whose contents are read from `source` when the
    /// archive is written.
    pub fn file(
        &mut self,
        source: impl AsRef<Path>,
        name: impl AsRef<str>,
        timestamp: Timestamp,
    ) -> Result<&mut ArchiveBuilder, Error> {
        let name = check_entry_name(name.as_ref())?;
        self.entries.push(BuilderEntry {
            name,
            timestamp,
            kind: BuilderEntryKind::File(source.as_ref().to_path_buf()),
        });
        Ok(self)
    }

    /// Consume this `ArchiveBuilder`, writing the whole archive to `w`.
    /// Returns the total length of the stream.
    pub fn write_archive<W: Write + Seek>(mut self, w: &mut W) -> Result<u64, Error> {
        let count = u32::try_from(self.entries.len()).map_err(afsar_core::Error::TryFromInt)?;

        let header = Header {
            magic: MAGIC,
            count: count.to_le(),
        };
        w.write_all(bytemuck::bytes_of(&header))
            .map_err(wrap_io_err!("Write header"))?;

        // The region between the entry table and the data segment,
        // including the file-info pointer slot, is reserved at a constant
        // size. Both tables are backfilled into it below.
        write_zeros(w, DATA_OFFSET - HEADER_SIZE as u64)?;

        // Data pass: offsets become known here.
        for entry in self.entries.iter_mut() {
            let position = w
                .stream_position()
                .map_err(wrap_io_err!("Position in archive"))?;
            let offset =
                u32::try_from(position).map_err(|_| Error::Core(afsar_core::Error::Overflow))?;

            let size = match &mut entry.kind {
                BuilderEntryKind::File(source) => {
                    let mut source_file = OpenOptions::new()
                        .read(true)
                        .open(&source)
                        .map_err(wrap_io_err!(source, "Read source file"))?;
                    copy_data(&mut source_file, w)?
                }
                BuilderEntryKind::Data(data) => {
                    w.write_all(data).map_err(wrap_io_err!("Write entry data"))?;
                    data.len() as u64
                }
                BuilderEntryKind::Written(_) => {
                    unreachable!("write_archive shouldn't reach written")
                }
            };
            let size = u32::try_from(size).map_err(afsar_core::Error::TryFromInt)?;

            entry.kind = BuilderEntryKind::Written(TableEntry::new(offset, size));
            pad_to(w, self.padding)?;
        }

        // File-info table, in the same order as the entry table.
        let file_info_position = w
            .stream_position()
            .map_err(wrap_io_err!("Position in archive"))?;
        let file_info_offset = u32::try_from(file_info_position)
            .map_err(|_| Error::Core(afsar_core::Error::Overflow))?;

        for entry in &self.entries {
            let table_entry = match &entry.kind {
                BuilderEntryKind::Written(table_entry) => table_entry,
                _ => unreachable!("file-info pass ran before the data pass"),
            };

            let mut info = FileInfo {
                name: [0; NAME_SIZE],
                timestamp: entry.timestamp,
                size: table_entry.size,
            };
            info.name[..entry.name.len()].copy_from_slice(entry.name.as_bytes());
            w.write_all(bytemuck::bytes_of(&info))
                .map_err(wrap_io_err!("Write file info"))?;
        }

        let file_info_end = w
            .stream_position()
            .map_err(wrap_io_err!("Position in archive"))?;
        let file_info_size = u32::try_from(file_info_end - file_info_position)
            .map_err(afsar_core::Error::TryFromInt)?;
        let total = pad_to(w, self.padding)?;

        // Backfill the pointer slot and the entry table.
        w.seek(SeekFrom::Start(FILE_INFO_POINTER))
            .map_err(wrap_io_err!("Seek to file-info pointer"))?;
        let pointer = FileInfoPointer::new(file_info_offset, file_info_size);
        w.write_all(bytemuck::bytes_of(&pointer))
            .map_err(wrap_io_err!("Write file-info pointer"))?;

        w.seek(SeekFrom::Start(HEADER_SIZE as u64))
            .map_err(wrap_io_err!("Seek to entry table"))?;
        for entry in &self.entries {
            match &entry.kind {
                BuilderEntryKind::Written(table_entry) => {
                    w.write_all(bytemuck::bytes_of(table_entry))
                        .map_err(wrap_io_err!("Write entry table"))?;
                }
                _ => unreachable!("table pass ran before the data pass"),
            }
        }

        Ok(total)
    }
}

impl fmt::Debug for ArchiveBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ArchiveBuilder")
            .field("padding", &self.padding)
            .field("entries", &self.entries)
            .finish()
    }
}

/// Validate an entry name against the format: ASCII, at most the 32 bytes
/// the file-info name field holds.
fn check_entry_name(name: &str) -> Result<String, Error> {
    if !name.is_ascii() {
        return Err(Error::NonAsciiName {
            name: name.to_string(),
        });
    }
    if name.len() > NAME_SIZE {
        return Err(Error::NameTooLong {
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Pad the stream with zeros to the next multiple of `padding`. Writes
/// nothing when the position is already aligned. Returns the new position.
fn pad_to<W: Write + Seek>(w: &mut W, padding: u32) -> Result<u64, Error> {
    let position = w
        .stream_position()
        .map_err(wrap_io_err!("Position for padding"))?;
    let aligned = position.next_multiple_of(padding as u64);
    if aligned > position {
        write_zeros(w, aligned - position)?;
    }
    Ok(aligned)
}

fn write_zeros<W: Write>(w: &mut W, len: u64) -> Result<(), Error> {
    io::copy(&mut io::repeat(0).take(len), w).map_err(wrap_io_err!("Write padding"))?;
    Ok(())
}

fn copy_data<R: Read, W: Write>(source: &mut R, w: &mut W) -> Result<u64, Error> {
    io::copy(source, w).map_err(wrap_io_err!("Copy entry data"))
}
