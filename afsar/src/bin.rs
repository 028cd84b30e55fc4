use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::{
    check_name, read_listing, wrap_io_err, write_listing, Archive, ArchiveBuilder, ArchiveFile,
    Error, FILE_LISTING_NAME,
};

/// Build an archive from a folder. The folder must carry a
/// [`FILE_LISTING_NAME`] file naming every entry, in archive order, with
/// its timestamp; the entry contents are the folder's files of the same
/// names.
pub fn pack(
    folder: impl AsRef<Path>,
    archive_path: impl AsRef<Path>,
    padding: u32,
) -> Result<(), Error> {
    let folder = folder.as_ref();
    let archive_path = archive_path.as_ref();

    let mut builder = ArchiveBuilder::new(padding)?;
    for item in read_listing(folder.join(FILE_LISTING_NAME))? {
        check_name(&item.name)?;
        println!("adding {}", item.name);
        builder.file(folder.join(&item.name), &item.name, item.timestamp)?;
    }

    let mut archive_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(archive_path)
        .map_err(wrap_io_err!(archive_path, "Write archive"))?;
    builder.write_archive(&mut archive_file)?;

    Ok(())
}

/// Extract an archive into a folder, writing one file per entry plus the
/// listing that [`pack`] consumes.
pub fn unpack(archive_path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<(), Error> {
    let archive_path = archive_path.as_ref();
    let out_dir = out_dir.as_ref();

    let mut src = ArchiveFile::new(archive_path)?;
    let archive = Archive::read_from(&mut src)?;
    let file_info_missing = archive.file_info_missing();
    if file_info_missing {
        eprintln!(
            "{}: file info table not found, using placeholder names",
            archive_path.display()
        );
    }

    let mut entries = archive.into_entries();
    if file_info_missing {
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.name = format!("file_{:05}", index);
        }
    }

    fs::create_dir_all(out_dir).map_err(wrap_io_err!(out_dir, "Create output folder"))?;
    for entry in &entries {
        let target = out_dir.join(entry.checked_name()?);
        println!("extracted {} {}", entry.name, entry.timestamp);
        fs::write(&target, &entry.data).map_err(wrap_io_err!(target, "Write extracted file"))?;
    }
    write_listing(out_dir.join(FILE_LISTING_NAME), &entries)?;

    Ok(())
}
