mod archive;
mod bin;
mod builder;
mod file;
mod listing;

pub use crate::archive::{check_name, Archive, FileEntry};
pub use crate::bin::{pack, unpack};
pub use crate::builder::ArchiveBuilder;
pub use crate::file::ArchiveFile;
pub use crate::listing::{read_listing, write_listing, ListingEntry, FILE_LISTING_NAME};

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] afsar_core::Error),

    #[error("{reason}: {}", .file.display())]
    Io {
        reason: &'static str,
        file: PathBuf,
        source: io::Error,
    },

    #[error("padding must be a power of two, got {0}")]
    InvalidPadding(u32),

    #[error("file name is longer than 32 bytes: {name}")]
    NameTooLong { name: String },

    #[error("file name is not ASCII: {name}")]
    NonAsciiName { name: String },

    #[error("invalid file name: {name:?}")]
    InvalidName { name: String },

    #[error("{}:{line}: {reason}", .file.display())]
    Listing {
        file: PathBuf,
        line: usize,
        reason: &'static str,
    },
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        let mut source = self.source();
        while let Some(err) = source {
            writeln!(f, "\tCaused by: {err}")?;
            source = err.source();
        }

        Ok(())
    }
}

/// Build a `map_err` closure wrapping an `io::Error` with context and,
/// when one is at hand, the path involved.
macro_rules! wrap_io_err {
    ($file:expr, $reason:expr) => {
        |source| $crate::Error::Io {
            reason: $reason,
            file: ::std::path::PathBuf::from(&$file),
            source,
        }
    };
    ($reason:expr) => {
        |source| $crate::Error::Io {
            reason: $reason,
            file: ::std::path::PathBuf::new(),
            source,
        }
    };
}
pub(crate) use wrap_io_err;
