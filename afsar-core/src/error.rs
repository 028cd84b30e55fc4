use alloc::format;
use alloc::string::ToString;
use bytemuck::PodCastError;
use core::error;
use core::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub enum Error {
    Cast(PodCastError),
    InvalidMagic([u8; 4]),
    LengthMismatch { expected: u32, actual: u32 },
    NonAsciiName,
    Overflow,
    TryFromInt(core::num::TryFromIntError),
    UnexpectedEof,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Error::*;

        let msg = match self {
            Cast(err) => format!("Cast: {}", err),
            InvalidMagic(magic) => format!("Invalid magic bytes: {:02x?}", magic),
            LengthMismatch { expected, actual } => format!(
                "File info length mismatch: expected {}, got {}",
                expected, actual
            ),
            NonAsciiName => "Name contains non-ASCII bytes".to_string(),
            Overflow => "Overflow".to_string(),
            TryFromInt(err) => format!("TryFromInt: {}", err),
            UnexpectedEof => "Unexpected end of archive".to_string(),
        };
        write!(f, "{}", msg)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::TryFromInt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PodCastError> for Error {
    fn from(err: PodCastError) -> Error {
        Error::Cast(err)
    }
}

impl From<core::num::TryFromIntError> for Error {
    fn from(err: core::num::TryFromIntError) -> Error {
        Error::TryFromInt(err)
    }
}
