use std::str;

use itertools::Itertools;
use num::Num;

use crate::TarError;

/// Create an &str from a null-terminated string.
///
/// Anything after the first null byte is ignored. A field without a
/// null byte is used in its entirety.
pub fn trimmed_str(contents: &[u8]) -> Result<&str, TarError> {
    let end = match contents.iter().find_position(|&&x| x == 0u8) {
        Some((pos, _)) => pos,
        None => contents.len(),
    };
    str::from_utf8(&contents[..end]).map_err(|_| TarError::EncodingError)
}

/// Parse a numeric field stored as octal ASCII.
///
/// Leading and trailing spaces and nulls are tolerated, and an empty
/// field reads as zero.
pub fn parse_octal<T>(field: &[u8]) -> Result<T, TarError>
where
    T: Num,
    TarError: From<T::FromStrRadixErr>,
{
    let padding = |b: &u8| *b == b' ' || *b == 0;
    let start = field.iter().position(|b| !padding(b)).unwrap_or(field.len());
    let end = field.iter().rposition(|b| !padding(b)).map_or(start, |i| i + 1);
    let digits = trimmed_str(&field[start..end])?;

    if digits.is_empty() {
        return Ok(T::zero());
    }
    if !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return Err(TarError::InvalidOctal(field.to_vec()));
    }

    Ok(T::from_str_radix(digits, 8)?)
}

/// Write `value` into `field` as zero-padded octal, terminated by a
/// single null byte.
pub fn format_octal(field: &mut [u8], value: u64) -> Result<(), TarError> {
    let width = field.len().saturating_sub(1);
    let digits = format!("{:0width$o}", value, width = width);
    if field.is_empty() || digits.len() > width {
        return Err(TarError::OctalOverflow { value, width });
    }

    field[..width].copy_from_slice(digits.as_bytes());
    field[width] = 0;
    Ok(())
}
