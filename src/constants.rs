use std::ops::Range;

/// Size of a single tar block.
pub const BLOCK_SIZE: usize = 512;

/// Max length of the name field.
pub const NAME_SIZE: usize = 100;

/// Max length of the prefix field in the USTAR format.
pub const PREFIX_SIZE: usize = 155;

/// Byte array representing a single block in a tar file.
pub type TarBlock = [u8; BLOCK_SIZE];

/// Magic shared by the USTAR, PAX and STAR formats.
pub const MAGIC_USTAR: &[u8; 6] = b"ustar\0";
/// Version shared by the USTAR, PAX and STAR formats.
pub const VERSION_USTAR: &[u8; 2] = b"00";
/// Magic of the GNU format.
pub const MAGIC_GNU: &[u8; 6] = b"ustar ";
/// Version of the GNU format.
pub const VERSION_GNU: &[u8; 2] = b" \0";
/// Trailer at the very end of a STAR header.
pub const TRAILER_STAR: &[u8; 4] = b"tar\0";

/// Definitions for offsets within the tar header format.
///
/// These are the fields every format has in common, dating back to V7.
/// Numbers are stored in null-terminated octal, unless specified
/// otherwise.
pub mod header {
    use super::*;

    /// Range for the file name
    pub const NAME_RANGE: Range<usize> = 0..NAME_SIZE;
    /// Mode of the file as a number
    pub const MODE_RANGE: Range<usize> = 100..108;
    /// Owner UID of the file
    pub const OWNER_RANGE: Range<usize> = 108..116;
    /// Group ID of the file
    pub const GROUP_RANGE: Range<usize> = 116..124;
    /// Size of the file, as an octal null-terminated string.
    ///
    /// There are some cases in which this field is actually base 256
    /// (i.e. binary) encoded, so be careful.
    pub const SIZE_RANGE: Range<usize> = 124..136;
    /// Modification time in unix timestamp.
    pub const MTIME_RANGE: Range<usize> = 136..148;
    /// Range within a block that contains the checksum.
    ///
    /// Unlike the other numbers, it is terminated by a null and a space.
    pub const CHECKSUM_RANGE: Range<usize> = 148..156;
    /// Type of the entry.
    pub const TYPE_FLAG_RANGE: Range<usize> = 156..157;
    /// Contents of the link if the file is either a symlink or a hard
    /// link. Otherwise empty.
    pub const LINK_NAME_RANGE: Range<usize> = 157..257;
}

/// Fields introduced by USTAR, and kept by PAX, GNU and STAR.
pub mod ustar {
    use super::*;

    pub const MAGIC_RANGE: Range<usize> = 257..263;
    pub const VERSION_RANGE: Range<usize> = 263..265;
    /// Owner name, null-terminated.
    pub const USER_NAME_RANGE: Range<usize> = 265..297;
    /// Group name, null-terminated.
    pub const GROUP_NAME_RANGE: Range<usize> = 297..329;
    pub const DEV_MAJOR_RANGE: Range<usize> = 329..337;
    pub const DEV_MINOR_RANGE: Range<usize> = 337..345;
    /// Path prefix, joined to the name with a slash.
    pub const PREFIX_RANGE: Range<usize> = 345..345 + PREFIX_SIZE;
}

/// Schily's tar format. The prefix is shortened to make room for times
/// and a trailer.
pub mod star {
    use super::*;

    pub const PREFIX_RANGE: Range<usize> = 345..476;
    pub const ATIME_RANGE: Range<usize> = 476..488;
    pub const CTIME_RANGE: Range<usize> = 488..500;
    pub const TRAILER_RANGE: Range<usize> = 508..BLOCK_SIZE;
}

/// GNU format. Replaces the prefix with times and the old sparse map.
pub mod gnu {
    use super::*;

    pub const ATIME_RANGE: Range<usize> = 345..357;
    pub const CTIME_RANGE: Range<usize> = 357..369;
    /// Sparse entries followed by the "is extended" byte.
    pub const SPARSE_RANGE: Range<usize> = 386..386 + super::sparse::ENTRY_SIZE * 4 + 1;
    /// Size of the file once the sparse holes are filled in.
    pub const REAL_SIZE_RANGE: Range<usize> = 483..495;
}

/// Layout of a single entry in a sparse map.
pub mod sparse {
    use super::*;

    /// Size of one (offset, length) pair.
    pub const ENTRY_SIZE: usize = 24;
    pub const OFFSET_RANGE: Range<usize> = 0..12;
    pub const LENGTH_RANGE: Range<usize> = 12..ENTRY_SIZE;
}
