//! Bounds-checked helpers over a [`Buf`].

use crate::Error;
use bytes::Buf;

/// Checks that at least `len` bytes remain.
#[inline]
pub fn at_least<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

/// Returns the next byte without consuming it.
#[inline]
pub fn peek<B: Buf>(buf: &B) -> Result<u8, Error> {
    // `chunk` is only empty when nothing remains
    buf.chunk().first().copied().ok_or(Error::EndOfBuffer)
}

/// Discards `len` bytes, failing without advancing if fewer remain.
#[inline]
pub fn discard<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    at_least(buf, len)?;
    buf.advance(len);
    Ok(())
}

/// Converts a 32-bit length prefix to `usize`.
///
/// A length that does not fit in `usize` can never be backed by a resident
/// buffer, so it fails with [Error::EndOfBuffer].
#[inline]
pub fn len32(len: u32) -> Result<usize, Error> {
    usize::try_from(len).map_err(|_| Error::EndOfBuffer)
}
