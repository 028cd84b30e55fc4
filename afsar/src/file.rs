use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use bytemuck::Zeroable;

use afsar_core::{ArchiveSrc, Header, HEADER_SIZE};

use crate::{wrap_io_err, Error};

/// An AFS archive on disk, read through a buffered file handle.
#[derive(Debug)]
pub struct ArchiveFile {
    path: PathBuf,
    src: BufReader<File>,
    header: Header,
}

impl ArchiveFile {
    /// Open an archive and validate its header. A file that does not
    /// start with the AFS magic is rejected here.
    pub fn new(path: impl AsRef<Path>) -> Result<ArchiveFile, Error> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .open(&path)
            .map_err(wrap_io_err!(path, "Open archive"))?;

        let mut new = ArchiveFile {
            path,
            src: BufReader::new(file),

            // Need a blank header to construct the ArchiveFile, since a
            // positioned read needs the constructed value
            header: Header::zeroed(),
        };

        let mut data = [0; HEADER_SIZE];
        new.read_exact_at(0, &mut data)?;
        new.header = *Header::new(&data)?;

        Ok(new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &Header {
        &self.header
    }
}

impl ArchiveSrc for ArchiveFile {
    type Err = Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Error> {
        self.src
            .seek(SeekFrom::Start(offset))
            .map_err(wrap_io_err!(self.path, "Seek in archive"))?;
        self.src
            .read_exact(buf)
            .map_err(wrap_io_err!(self.path, "Read archive"))?;
        Ok(buf.len())
    }
}
