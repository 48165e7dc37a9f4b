//! Named windows over the fields of a header block.
//!
//! Every format lays out the same 512 bytes differently. A view does not
//! own or copy anything: it borrows the block, so a write through one view
//! is visible through the block and any view created after it.

use crate::constants::{gnu, header, star, ustar, BLOCK_SIZE};
use crate::sparse::SparseArray;

macro_rules! header_view {
    ($(#[$meta:meta])* $view:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $view<B> {
            bytes: B,
        }

        impl<B: AsRef<[u8]>> $view<B> {
            pub(crate) fn new(bytes: B) -> Self {
                debug_assert_eq!(BLOCK_SIZE, bytes.as_ref().len());
                $view { bytes }
            }

            /// A read-only view of the same bytes.
            pub fn view(&self) -> $view<&[u8]> {
                $view { bytes: self.bytes.as_ref() }
            }
        }
    };
}

/// Read accessors borrow from the block rather than from the view, so a
/// field outlives the view it was read through.
macro_rules! fields {
    ($view:ident { $($(#[$doc:meta])* $name:ident / $name_mut:ident => $range:expr;)* }) => {
        impl<'a> $view<&'a [u8]> {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> &'a [u8] {
                    &self.bytes[$range]
                }
            )*
        }

        impl<B: AsRef<[u8]> + AsMut<[u8]>> $view<B> {
            $(
                pub fn $name_mut(&mut self) -> &mut [u8] {
                    &mut self.bytes.as_mut()[$range]
                }
            )*
        }
    };
}

/// Fields present in V7 and also at the same place in every later format.
macro_rules! common_view {
    ($view:ident) => {
        impl<'a> $view<&'a [u8]> {
            /// The V7 fields of this header.
            pub fn v7(&self) -> HeaderV7<&'a [u8]> {
                HeaderV7::new(self.bytes)
            }
        }

        impl<B: AsRef<[u8]> + AsMut<[u8]>> $view<B> {
            pub fn v7_mut(&mut self) -> HeaderV7<&mut [u8]> {
                HeaderV7::new(self.bytes.as_mut())
            }
        }

        fields!($view {
            magic / magic_mut => ustar::MAGIC_RANGE;
            version / version_mut => ustar::VERSION_RANGE;
            user_name / user_name_mut => ustar::USER_NAME_RANGE;
            group_name / group_name_mut => ustar::GROUP_NAME_RANGE;
            dev_major / dev_major_mut => ustar::DEV_MAJOR_RANGE;
            dev_minor / dev_minor_mut => ustar::DEV_MINOR_RANGE;
        });
    };
}

header_view!(
    /// The original Unix V7 header. Everything past the link name is
    /// unused in this format.
    HeaderV7
);

fields!(HeaderV7 {
    name / name_mut => header::NAME_RANGE;
    mode / mode_mut => header::MODE_RANGE;
    uid / uid_mut => header::OWNER_RANGE;
    gid / gid_mut => header::GROUP_RANGE;
    size / size_mut => header::SIZE_RANGE;
    mod_time / mod_time_mut => header::MTIME_RANGE;
    /// Six octal digits, a null and a space.
    checksum / checksum_mut => header::CHECKSUM_RANGE;
    type_flag / type_flag_mut => header::TYPE_FLAG_RANGE;
    link_name / link_name_mut => header::LINK_NAME_RANGE;
});

header_view!(
    /// POSIX USTAR header, also used by PAX.
    HeaderUstar
);
common_view!(HeaderUstar);

fields!(HeaderUstar {
    prefix / prefix_mut => ustar::PREFIX_RANGE;
});

header_view!(
    /// Schily's STAR header.
    HeaderStar
);
common_view!(HeaderStar);

fields!(HeaderStar {
    prefix / prefix_mut => star::PREFIX_RANGE;
    access_time / access_time_mut => star::ATIME_RANGE;
    change_time / change_time_mut => star::CTIME_RANGE;
    trailer / trailer_mut => star::TRAILER_RANGE;
});

header_view!(
    /// GNU header, with the old style sparse map.
    HeaderGnu
);
common_view!(HeaderGnu);

fields!(HeaderGnu {
    access_time / access_time_mut => gnu::ATIME_RANGE;
    change_time / change_time_mut => gnu::CTIME_RANGE;
    /// Size of the file with its holes filled in.
    real_size / real_size_mut => gnu::REAL_SIZE_RANGE;
});

impl<'a> HeaderGnu<&'a [u8]> {
    pub fn sparse(&self) -> SparseArray<&'a [u8]> {
        SparseArray::new(&self.bytes[gnu::SPARSE_RANGE])
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> HeaderGnu<B> {
    pub fn sparse_mut(&mut self) -> SparseArray<&mut [u8]> {
        SparseArray::new(&mut self.bytes.as_mut()[gnu::SPARSE_RANGE])
    }
}

#[cfg(test)]
mod tests {
    use crate::{Block, Format};

    #[test]
    fn test_field_lengths() {
        let block = Block::new();
        let v7 = block.v7();
        assert_eq!(100, v7.name().len());
        assert_eq!(8, v7.mode().len());
        assert_eq!(12, v7.size().len());
        assert_eq!(8, v7.checksum().len());
        assert_eq!(1, v7.type_flag().len());
        assert_eq!(100, v7.link_name().len());

        assert_eq!(155, block.ustar().prefix().len());
        assert_eq!(131, block.star().prefix().len());
        assert_eq!(4, block.star().trailer().len());
        assert_eq!(12, block.gnu().real_size().len());
        assert_eq!(6, block.gnu().magic().len());
        assert_eq!(2, block.gnu().version().len());
    }

    #[test]
    fn test_views_alias() {
        let mut block = Block::new();
        block.gnu_mut().access_time_mut().copy_from_slice(b"00000000017\0");
        block.v7_mut().name_mut()[..5].copy_from_slice(b"hello");
        block.star_mut().trailer_mut().copy_from_slice(b"tar\0");

        // GNU times sit where USTAR keeps its prefix.
        assert_eq!(b"00000000017\0", &block.ustar().prefix()[..12]);
        assert_eq!(b"00000000017\0", &block.as_bytes()[345..357]);
        assert_eq!(b"hello", &block.star().v7().name()[..5]);
        assert_eq!(b"tar\0", &block.as_bytes()[508..]);
    }

    #[test]
    fn test_gnu_layout() {
        let mut block = Block::new();
        {
            let mut gnu = block.gnu_mut();
            gnu.sparse_mut().entry_mut(0).offset_mut()[0] = b'1';
            gnu.sparse_mut().is_extended_mut()[0] = b'1';
            gnu.real_size_mut()[0] = b'7';
        }

        assert_eq!(b'1', block.as_bytes()[386]);
        assert_eq!(b'1', block.as_bytes()[482]);
        assert_eq!(b'7', block.as_bytes()[483]);
        assert_eq!(4, block.gnu().sparse().max_entries());
    }

    #[test]
    fn test_fields_outlive_view() {
        let mut block = Block::new();
        block.set_format(Format::GNU);

        let magic = block.ustar().magic();
        let name = block.gnu().v7().name();
        let entry = block.gnu().sparse().entry(3);
        let length = entry.length();

        assert_eq!(b"ustar ", magic);
        assert_eq!(100, name.len());
        assert_eq!(12, length.len());
        assert_eq!(length.as_ptr(), block.as_bytes()[470..].as_ptr());
    }

    #[test]
    fn test_read_through_mut_view() {
        let mut block = Block::new();
        let mut star = block.star_mut();
        star.trailer_mut().copy_from_slice(b"tar\0");
        assert_eq!(b"tar\0", star.view().trailer());
        assert_eq!(100, star.view().v7().link_name().len());
    }

    #[test]
    fn test_star_layout() {
        let mut block = Block::new();
        block.star_mut().access_time_mut()[0] = b'a';
        block.star_mut().change_time_mut()[11] = b'c';
        assert_eq!(b'a', block.as_bytes()[476]);
        assert_eq!(b'c', block.as_bytes()[499]);
    }
}
