use std::io::{Seek, Write};
use std::path::{Component, Path};

use afsar_core::{ArchiveSrc, Timestamp};

use crate::{ArchiveBuilder, Error};

/// A single named file held in memory, as decoded from an archive or
/// assembled for one. Offsets are an encoding detail and never appear
/// here; they live in the builder while an archive is being written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub timestamp: Timestamp,
    pub data: Vec<u8>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, timestamp: Timestamp, data: Vec<u8>) -> FileEntry {
        FileEntry {
            name: name.into(),
            timestamp,
            data,
        }
    }

    /// The name as a relative path, checked to be a single normal
    /// component.
    pub fn checked_name(&self) -> Result<&Path, Error> {
        check_name(&self.name)
    }
}

/// Ensure that a file name maps to exactly one normal path component, so
/// it can be joined under a folder without escaping it.
pub fn check_name(name: &str) -> Result<&Path, Error> {
    let path = Path::new(name);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(path),
        _ => Err(Error::InvalidName {
            name: name.to_string(),
        }),
    }
}

/// An archive held in memory: an ordered sequence of entries. The order
/// is significant, it fixes both the on-disk data layout and the table
/// order.
#[derive(Clone, Debug)]
pub struct Archive {
    entries: Vec<FileEntry>,
    file_info_missing: bool,
}

impl Archive {
    pub fn new(entries: Vec<FileEntry>) -> Archive {
        Archive {
            entries,
            file_info_missing: false,
        }
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<FileEntry> {
        self.entries
    }

    /// True when the archive had no file-info table: the entries carry
    /// empty names and epoch timestamps. This is a degraded read, not an
    /// error.
    pub fn file_info_missing(&self) -> bool {
        self.file_info_missing
    }

    /// Decode an archive from a random-access source.
    pub fn read_from<S>(src: &mut S) -> Result<Archive, Error>
    where
        S: ArchiveSrc,
        Error: From<S::Err>,
    {
        let header = src.header()?;
        let table = src.table_entries(&header)?;

        let mut contents = Vec::with_capacity(table.len());
        for table_entry in &table {
            contents.push(src.read_entry_data(table_entry)?);
        }

        let pointer = src.file_info_pointer()?;
        if !pointer.is_present() {
            let entries = contents
                .into_iter()
                .map(|data| FileEntry::new(String::new(), Timestamp::EPOCH, data))
                .collect();
            return Ok(Archive {
                entries,
                file_info_missing: true,
            });
        }

        let infos = src.file_infos(&header, &pointer)?;
        let mut entries = Vec::with_capacity(table.len());
        for ((table_entry, info), data) in table.iter().zip(&infos).zip(contents) {
            info.verify(table_entry)?;
            entries.push(FileEntry::new(info.name()?, info.timestamp(), data));
        }

        Ok(Archive {
            entries,
            file_info_missing: false,
        })
    }

    /// Encode the archive with the given padding granularity. Returns the
    /// total number of bytes written.
    pub fn write_to<W: Write + Seek>(&self, w: &mut W, padding: u32) -> Result<u64, Error> {
        let mut builder = ArchiveBuilder::new(padding)?;
        for entry in &self.entries {
            builder.data(&entry.name, entry.timestamp, entry.data.clone())?;
        }
        builder.write_archive(w)
    }
}
