//! The header block of a tar archive.
//!
//! Over the years, V7, USTAR, PAX, GNU and STAR have all laid out the same
//! 512 byte header in their own way. A [`Block`] holds the raw bytes, tells
//! which of those formats it may be in, and hands out views to read and
//! write the fields of each.

use std::num::ParseIntError;

use thiserror::Error;

pub use crate::block::{block_padding, Block};
pub use crate::format::Format;
pub use crate::sparse::{SparseArray, SparseElem};
pub use crate::view::{HeaderGnu, HeaderStar, HeaderUstar, HeaderV7};

mod block;
pub mod constants;
mod format;
mod sparse;
mod utils;
mod view;

pub use crate::utils::{format_octal, parse_octal};

#[derive(Debug, Error)]
pub enum TarError {
    #[error("checksum {stored} matches neither {unsigned} (unsigned) nor {signed} (signed)")]
    CheckSum {
        stored: u64,
        unsigned: u64,
        signed: i64,
    },
    #[error("field is not valid UTF-8")]
    EncodingError,
    #[error("invalid octal field: {0:?}")]
    InvalidOctal(Vec<u8>),
    #[error("{value:o} does not fit in {width} octal digits")]
    OctalOverflow { value: u64, width: usize },
    #[error("failed to parse number: {0}")]
    ParseError(#[from] ParseIntError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_views() {
        let mut block = Block::new();
        block.v7_mut().name_mut()[..10].copy_from_slice(b"Cargo.toml");
        block.ustar_mut().user_name_mut()[..4].copy_from_slice(b"bert");
        block.set_format(Format::GNU);

        assert_eq!(Format::GNU, block.get_format());
        let gnu = block.gnu();
        assert_eq!(b"Cargo.toml", &gnu.v7().name()[..10]);
        assert_eq!(b"bert", &gnu.user_name()[..4]);
        assert_eq!(gnu.v7().checksum(), block.v7().checksum());
    }

    #[test]
    fn test_error_display() {
        let err = parse_octal::<u64>(b"9\0").unwrap_err();
        assert_eq!("invalid octal field: [57, 0]", err.to_string());
    }
}
