use std::convert::TryFrom;

use log::{debug, trace};

use crate::constants::{
    header::CHECKSUM_RANGE, TarBlock, BLOCK_SIZE, MAGIC_GNU, MAGIC_USTAR, TRAILER_STAR,
    VERSION_GNU, VERSION_USTAR,
};
use crate::format::Format;
use crate::sparse::SparseArray;
use crate::utils::{format_octal, parse_octal};
use crate::view::{HeaderGnu, HeaderStar, HeaderUstar, HeaderV7};
use crate::TarError;

/// Number of bytes needed to pad `offset` up to the next block edge.
///
/// Always less than `BLOCK_SIZE`.
pub fn block_padding(offset: u64) -> u64 {
    offset.wrapping_neg() & (BLOCK_SIZE as u64 - 1)
}

/// A single 512 byte block, as found in a tar stream.
///
/// The block itself does not know what it contains; use `get_format` to
/// find out and then one of the header views to read its fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Block(TarBlock);

impl Block {
    /// The all zero block, which marks the end of an archive.
    pub const ZERO: Block = Block([0; BLOCK_SIZE]);

    pub fn new() -> Block {
        Block::ZERO
    }

    pub fn as_bytes(&self) -> &TarBlock {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut TarBlock {
        &mut self.0
    }

    /// Clear the block with all zeros.
    pub fn reset(&mut self) {
        self.0 = [0; BLOCK_SIZE];
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn v7(&self) -> HeaderV7<&[u8]> {
        HeaderV7::new(&self.0[..])
    }

    pub fn v7_mut(&mut self) -> HeaderV7<&mut [u8]> {
        HeaderV7::new(&mut self.0[..])
    }

    pub fn ustar(&self) -> HeaderUstar<&[u8]> {
        HeaderUstar::new(&self.0[..])
    }

    pub fn ustar_mut(&mut self) -> HeaderUstar<&mut [u8]> {
        HeaderUstar::new(&mut self.0[..])
    }

    pub fn star(&self) -> HeaderStar<&[u8]> {
        HeaderStar::new(&self.0[..])
    }

    pub fn star_mut(&mut self) -> HeaderStar<&mut [u8]> {
        HeaderStar::new(&mut self.0[..])
    }

    pub fn gnu(&self) -> HeaderGnu<&[u8]> {
        HeaderGnu::new(&self.0[..])
    }

    pub fn gnu_mut(&mut self) -> HeaderGnu<&mut [u8]> {
        HeaderGnu::new(&mut self.0[..])
    }

    /// The whole block as a sparse map, as found in the extension blocks
    /// following a GNU sparse header.
    pub fn sparse(&self) -> SparseArray<&[u8]> {
        SparseArray::new(&self.0[..])
    }

    pub fn sparse_mut(&mut self) -> SparseArray<&mut [u8]> {
        SparseArray::new(&mut self.0[..])
    }

    /// Compute the header checksum, both as a sum of unsigned bytes and
    /// as a sum of signed bytes.
    ///
    /// POSIX specifies the unsigned sum, but the Sun tar used signed bytes,
    /// and both are still found in the wild. The checksum field itself is
    /// counted as if it held only spaces.
    pub fn compute_checksum(&self) -> (u64, i64) {
        let mut unsigned = 0u64;
        let mut signed = 0i64;

        for (i, &c) in self.0.iter().enumerate() {
            let c = if CHECKSUM_RANGE.contains(&i) { b' ' } else { c };
            unsigned += u64::from(c);
            signed += i64::from(c as i8);
        }

        (unsigned, signed)
    }

    /// The checksum as stored in the header.
    pub fn stored_checksum(&self) -> Result<u64, TarError> {
        parse_octal(&self.0[CHECKSUM_RANGE])
    }

    /// Check the stored checksum against both ways of computing it.
    pub fn verify_checksum(&self) -> Result<(), TarError> {
        let stored = self.stored_checksum()?;
        let (unsigned, signed) = self.compute_checksum();

        if stored == unsigned || i64::try_from(stored).ok() == Some(signed) {
            Ok(())
        } else {
            Err(TarError::CheckSum {
                stored,
                unsigned,
                signed,
            })
        }
    }

    /// Determine which formats this block may be a header of.
    ///
    /// A block with a bad checksum is not a header at all, and yields
    /// `Format::UNKNOWN`. USTAR and PAX headers look exactly the same, so
    /// those are reported together.
    pub fn get_format(&self) -> Format {
        match self.detect_format() {
            Ok(format) => format,
            Err(e) => {
                debug!("not a tar header: {}", e);
                Format::UNKNOWN
            }
        }
    }

    fn detect_format(&self) -> Result<Format, TarError> {
        self.verify_checksum()?;

        let star = self.star();
        let magic = star.magic();
        let version = star.version();
        let trailer = star.trailer();

        let format = if magic == MAGIC_USTAR && trailer == TRAILER_STAR {
            Format::STAR
        } else if magic == MAGIC_USTAR {
            Format::USTAR | Format::PAX
        } else if magic == MAGIC_GNU && version == VERSION_GNU {
            Format::GNU
        } else {
            Format::V7
        };

        Ok(format)
    }

    /// Write the magic values for `format`, then update the checksum.
    ///
    /// # Panics
    ///
    /// If `format` does not hold exactly one of the known formats.
    pub fn set_format(&mut self, format: Format) {
        assert!(
            format.is_single(),
            "cannot write a header in format {}",
            format
        );

        if format == Format::V7 {
            // V7 predates the magic, nothing to write.
        } else if format == Format::GNU {
            let mut gnu = self.gnu_mut();
            gnu.magic_mut().copy_from_slice(MAGIC_GNU);
            gnu.version_mut().copy_from_slice(VERSION_GNU);
        } else if format == Format::STAR {
            let mut star = self.star_mut();
            star.magic_mut().copy_from_slice(MAGIC_USTAR);
            star.version_mut().copy_from_slice(VERSION_USTAR);
            star.trailer_mut().copy_from_slice(TRAILER_STAR);
        } else if format.has(Format::USTAR | Format::PAX) {
            let mut ustar = self.ustar_mut();
            ustar.magic_mut().copy_from_slice(MAGIC_USTAR);
            ustar.version_mut().copy_from_slice(VERSION_USTAR);
        } else {
            panic!("invalid format {:#x}", format.bits());
        }

        // At most 512 * 255, which always fits in six octal digits.
        let (chksum, _) = self.compute_checksum();
        let mut v7 = self.v7_mut();
        let field = v7.checksum_mut();
        format_octal(&mut field[..7], chksum).expect("checksum fits in six octal digits");
        field[7] = b' ';

        trace!("wrote {} header with checksum {:o}", format, chksum);
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::new()
    }
}

impl From<TarBlock> for Block {
    fn from(bytes: TarBlock) -> Self {
        Block(bytes)
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("format", &self.detect_format().unwrap_or(Format::UNKNOWN))
            .field("bytes", &&self.0[..])
            .finish()
    }
}
