use crate::constants::sparse::{ENTRY_SIZE, LENGTH_RANGE, OFFSET_RANGE};
use crate::utils::parse_octal;
use crate::TarError;

/// Old GNU sparse map: a run of (offset, length) pairs followed by a
/// single "is extended" byte.
///
/// Whether the map continues in the next block is for the archive reader
/// to decide; this only locates the flag.
#[derive(Debug)]
pub struct SparseArray<B> {
    bytes: B,
}

/// One (offset, length) pair of a sparse map, both as octal numbers.
#[derive(Debug)]
pub struct SparseElem<B> {
    bytes: B,
}

impl<B: AsRef<[u8]>> SparseArray<B> {
    pub fn new(bytes: B) -> Self {
        SparseArray { bytes }
    }

    /// Number of entries that fit before the trailing flag byte.
    pub fn max_entries(&self) -> usize {
        self.bytes.as_ref().len() / ENTRY_SIZE
    }

    /// A read-only view of the same map.
    pub fn view(&self) -> SparseArray<&[u8]> {
        SparseArray::new(self.bytes.as_ref())
    }

    fn flag_offset(&self) -> usize {
        ENTRY_SIZE * self.max_entries()
    }
}

impl<'a> SparseArray<&'a [u8]> {
    /// Entry `i` of the map.
    ///
    /// # Panics
    ///
    /// If `i` is not below `max_entries()`.
    pub fn entry(&self, i: usize) -> SparseElem<&'a [u8]> {
        SparseElem::new(&self.bytes[entry_range(i)])
    }

    pub fn entries(&self) -> impl Iterator<Item = SparseElem<&'a [u8]>> + 'a {
        let bytes = self.bytes;
        (0..self.max_entries()).map(move |i| SparseElem::new(&bytes[entry_range(i)]))
    }

    /// The byte signalling that more entries follow in an extension block.
    pub fn is_extended(&self) -> &'a [u8] {
        let start = self.flag_offset();
        &self.bytes[start..start + 1]
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SparseArray<B> {
    pub fn entry_mut(&mut self, i: usize) -> SparseElem<&mut [u8]> {
        SparseElem::new(&mut self.bytes.as_mut()[entry_range(i)])
    }

    pub fn is_extended_mut(&mut self) -> &mut [u8] {
        let start = self.flag_offset();
        &mut self.bytes.as_mut()[start..start + 1]
    }
}

fn entry_range(i: usize) -> std::ops::Range<usize> {
    i * ENTRY_SIZE..(i + 1) * ENTRY_SIZE
}

impl<B: AsRef<[u8]>> SparseElem<B> {
    pub fn new(bytes: B) -> Self {
        debug_assert_eq!(ENTRY_SIZE, bytes.as_ref().len());
        SparseElem { bytes }
    }

    /// Offset of the data extent within the file.
    pub fn offset_value(&self) -> Result<u64, TarError> {
        parse_octal(&self.bytes.as_ref()[OFFSET_RANGE])
    }

    /// Length of the data extent.
    pub fn length_value(&self) -> Result<u64, TarError> {
        parse_octal(&self.bytes.as_ref()[LENGTH_RANGE])
    }
}

impl<'a> SparseElem<&'a [u8]> {
    pub fn offset(&self) -> &'a [u8] {
        &self.bytes[OFFSET_RANGE]
    }

    pub fn length(&self) -> &'a [u8] {
        &self.bytes[LENGTH_RANGE]
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SparseElem<B> {
    pub fn offset_mut(&mut self) -> &mut [u8] {
        &mut self.bytes.as_mut()[OFFSET_RANGE]
    }

    pub fn length_mut(&mut self) -> &mut [u8] {
        &mut self.bytes.as_mut()[LENGTH_RANGE]
    }
}
