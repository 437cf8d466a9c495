//! Bounds-checked little-endian read helpers for sequential record cursors.
//!
//! All table data in the supported container family is little-endian. Reads
//! advance the caller's offset by exactly the number of bytes consumed, and
//! never advance it on failure.

use crate::{Error::OutOfBounds, Result};

/// Unsigned integer types a record cursor can read directly.
pub(crate) trait LeInt: Sized {
    /// Byte-array form consumed by `from_le_bytes`.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Decode `Self` from its little-endian byte representation.
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

impl LeInt for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u8::from_le_bytes(bytes)
    }
}

impl LeInt for u16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u16::from_le_bytes(bytes)
    }
}

impl LeInt for u32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u32::from_le_bytes(bytes)
    }
}

/// Reads a `T` at `offset`, advancing `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes
/// remain at `offset`.
pub(crate) fn read_le_at<T: LeInt>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if (type_len + *offset) > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;

    Ok(T::from_le_bytes(read))
}

/// Reads either a 2-byte or a 4-byte value depending on `is_large`,
/// promoting the narrow form to `u32`.
///
/// This is the primitive behind every variable-width index column: the same
/// column is `u16` in small containers and `u32` in large ones.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if insufficient bytes remain.
pub(crate) fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    let res = if is_large {
        read_le_at::<u32>(data, offset)?
    } else {
        u32::from(read_le_at::<u16>(data, offset)?)
    };

    Ok(res)
}
