use std::fmt;

use bitflags::bitflags;
use itertools::Itertools;

bitflags! {
    /// The tar header format a block may be in.
    ///
    /// Several formats can be indistinguishable from a single block, so a
    /// value may hold more than one candidate. The empty set means the
    /// format is unknown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Format: u8 {
        /// The original Unix V7 format, prior to standardization.
        const V7 = 1 << 0;
        /// POSIX.1-1988.
        const USTAR = 1 << 1;
        /// POSIX.1-2001. Identical to USTAR at the block level; the
        /// difference is a preceding extended header record.
        const PAX = 1 << 2;
        const GNU = 1 << 3;
        /// Schily's tar format, incompatible with USTAR.
        const STAR = 1 << 4;
    }
}

impl Format {
    pub const UNKNOWN: Format = Format::empty();

    /// True if both share at least one possible format.
    pub fn has(self, other: Format) -> bool {
        self.intersects(other)
    }

    /// Add `other` to the candidates.
    pub fn may_be(&mut self, other: Format) {
        self.insert(other);
    }

    /// Narrow the candidates down to those also in `other`.
    pub fn may_only_be(&mut self, other: Format) {
        *self &= other;
    }

    /// Rule out `other`.
    pub fn must_not_be(&mut self, other: Format) {
        self.remove(other);
    }

    /// True if exactly one format is possible.
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::UNKNOWN
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<_> = self.iter_names().map(|(name, _)| name).collect();

        match names.len() {
            0 => f.write_str("<unknown>"),
            1 => f.write_str(names[0]),
            _ => write!(f, "({})", names.iter().join(" | ")),
        }
    }
}
