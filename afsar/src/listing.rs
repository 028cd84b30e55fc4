use std::fmt::Write;
use std::fs;
use std::path::Path;

use afsar_core::Timestamp;

use crate::{wrap_io_err, Error, FileEntry};

/// Name of the side-car file that carries entry names and timestamps
/// alongside an extracted folder.
pub const FILE_LISTING_NAME: &str = "__FILE_LISTING.txt";

/// One parsed listing line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub timestamp: Timestamp,
}

/// Parse a listing file: one `name;;year month day hour minute second`
/// line per entry, in archive order. Blank lines are skipped.
pub fn read_listing(path: impl AsRef<Path>) -> Result<Vec<ListingEntry>, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(wrap_io_err!(path, "Read file listing"))?;

    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let listing_err = |reason| Error::Listing {
            file: path.to_path_buf(),
            line: index + 1,
            reason,
        };

        let (name, timestamp) = line
            .split_once(";;")
            .ok_or_else(|| listing_err("missing ';;' separator"))?;
        let name = name.trim().to_string();

        let fields = timestamp
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<u16>, _>>()
            .map_err(|_| listing_err("malformed timestamp"))?;
        let &[year, month, day, hour, minute, second] = fields.as_slice() else {
            return Err(listing_err("timestamp must have six fields"));
        };

        let timestamp = Timestamp::new(year, month, day, hour, minute, second);
        if !timestamp_in_range(&timestamp) {
            return Err(listing_err("timestamp out of range"));
        }

        entries.push(ListingEntry { name, timestamp });
    }
    Ok(entries)
}

/// Write the listing for a set of entries, in archive order.
pub fn write_listing(path: impl AsRef<Path>, entries: &[FileEntry]) -> Result<(), Error> {
    let path = path.as_ref();

    let mut text = String::new();
    for entry in entries {
        let ts = &entry.timestamp;
        writeln!(
            text,
            "{};;{} {} {} {} {} {}",
            entry.name,
            ts.year(),
            ts.month(),
            ts.day(),
            ts.hour(),
            ts.minute(),
            ts.second(),
        )
        .expect("writing to a String cannot fail");
    }

    fs::write(path, text).map_err(wrap_io_err!(path, "Write file listing"))?;
    Ok(())
}

fn timestamp_in_range(timestamp: &Timestamp) -> bool {
    (1..=12).contains(&timestamp.month())
        && (1..=31).contains(&timestamp.day())
        && timestamp.hour() < 24
        && timestamp.minute() < 60
        && timestamp.second() < 60
}
