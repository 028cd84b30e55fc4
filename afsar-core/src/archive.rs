use alloc::vec;
use alloc::vec::Vec;
use core::mem;

use crate::{
    Error, FileInfo, FileInfoPointer, Header, TableEntry, FILE_INFO_POINTER, FILE_INFO_SIZE,
    HEADER_SIZE,
};

/// Random-access source of archive bytes.
///
/// Both tables and the entry data are located by absolute offsets, so a
/// source has to support positioned reads rather than forward streaming.
pub trait ArchiveSrc {
    type Err: From<Error>;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err>;

    /// Read exactly `buf.len()` bytes at `offset`
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Err> {
        let count = self.read_at(offset, buf)?;
        if count != buf.len() {
            return Err(Error::UnexpectedEof.into());
        }
        Ok(())
    }

    fn header(&mut self) -> Result<Header, Self::Err> {
        let mut data = [0; HEADER_SIZE];
        self.read_exact_at(0, &mut data)?;
        let header = Header::new(&data)?;
        Ok(*header)
    }

    /// Read the entry table that follows the header, in archive order
    fn table_entries(&mut self, header: &Header) -> Result<Vec<TableEntry>, Self::Err> {
        let table_size = header.table_size()?;
        let mut data = vec![0; table_size];
        self.read_exact_at(HEADER_SIZE as u64, &mut data)?;

        let entries: &[TableEntry] = bytemuck::try_cast_slice(data.as_slice()).map_err(Error::Cast)?;
        Ok(entries.to_vec())
    }

    /// Read the pointer slot at its fixed position
    fn file_info_pointer(&mut self) -> Result<FileInfoPointer, Self::Err> {
        let mut data = [0; mem::size_of::<FileInfoPointer>()];
        self.read_exact_at(FILE_INFO_POINTER, &mut data)?;

        let pointer: &FileInfoPointer = bytemuck::try_from_bytes(&data).map_err(Error::Cast)?;
        Ok(*pointer)
    }

    /// Read the file-info table, in archive order. Callers must have
    /// checked `pointer.is_present()` first.
    fn file_infos(
        &mut self,
        header: &Header,
        pointer: &FileInfoPointer,
    ) -> Result<Vec<FileInfo>, Self::Err> {
        let infos_size = (header.count() as usize)
            .checked_mul(FILE_INFO_SIZE)
            .ok_or(Error::Overflow)?;
        let mut data = vec![0; infos_size];
        self.read_exact_at(pointer.offset() as u64, &mut data)?;

        let infos: &[FileInfo] = bytemuck::try_cast_slice(data.as_slice()).map_err(Error::Cast)?;
        Ok(infos.to_vec())
    }

    /// Read the raw content bytes for one table entry. Offsets are
    /// absolute and honored exactly; entries need not be laid out in
    /// table order.
    fn read_entry_data(&mut self, entry: &TableEntry) -> Result<Vec<u8>, Self::Err> {
        let size = usize::try_from(entry.size()).map_err(Error::TryFromInt)?;
        let mut data = vec![0; size];
        self.read_exact_at(entry.offset() as u64, &mut data)?;
        Ok(data)
    }
}

impl<T: AsRef<[u8]>> ArchiveSrc for T {
    type Err = Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Error> {
        let data = self.as_ref();
        let start = usize::try_from(offset).map_err(Error::TryFromInt)?;
        if start >= data.len() {
            return Ok(0);
        }
        let end = start
            .checked_add(buf.len())
            .ok_or(Error::Overflow)?
            .min(data.len());
        let count = end - start;
        buf[..count].copy_from_slice(&data[start..end]);
        Ok(count)
    }
}
