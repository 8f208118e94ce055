//! Skipping over values without decoding them.
//!
//! [`Decoder::skip_size`] consumes a single tag together with everything that
//! belongs to it directly (length prefixes and scalar, string, binary, or
//! extension payloads) and reports how many child values follow it.
//! [`Decoder::skip`] keeps a running count of outstanding children instead of
//! recursing, so arbitrarily deep nesting costs no stack.

use crate::{
    tag::{self, Family},
    util::len32,
    Decoder, Error,
};
use bytes::Buf;
use tracing::trace;

impl<B: Buf> Decoder<B> {
    /// Consumes the header of the next value and returns how many child values
    /// must be skipped after it.
    ///
    /// Scalars, strings, binary, and extension values have no children. An
    /// array of `n` elements has `n` children, a map of `n` pairs has `2n`.
    ///
    /// The reserved tag `0xc1` fails with [Error::UnknownTag] since there is no
    /// way to tell how long the value behind it is.
    pub fn skip_size(&mut self) -> Result<u64, Error> {
        let tag = self.peek_tag()?;
        match Family::of(tag) {
            Family::FixInt | Family::NegativeFixInt | Family::Nil | Family::Bool => {
                self.discard(1)?;
                return Ok(0);
            }
            Family::FixMap => {
                self.consume_tag();
                return Ok(2 * tag::fix_size(tag) as u64);
            }
            Family::FixArray => {
                self.consume_tag();
                return Ok(tag::fix_size(tag) as u64);
            }
            Family::FixStr => {
                self.discard(1 + tag::fixstr_len(tag))?;
                return Ok(0);
            }
            Family::Unknown => return Err(Error::UnknownTag(tag)),
            _ => {}
        }

        // Sized tags
        match tag {
            tag::FLOAT32 => self.discard(1 + 4)?,
            tag::FLOAT64 => self.discard(1 + 8)?,
            tag::UINT8 | tag::INT8 => self.discard(1 + 1)?,
            tag::UINT16 | tag::INT16 => self.discard(1 + 2)?,
            tag::UINT32 | tag::INT32 => self.discard(1 + 4)?,
            tag::UINT64 | tag::INT64 => self.discard(1 + 8)?,

            // Type byte plus data
            tag::FIXEXT1 => self.discard(1 + 2)?,
            tag::FIXEXT2 => self.discard(1 + 3)?,
            tag::FIXEXT4 => self.discard(1 + 5)?,
            tag::FIXEXT8 => self.discard(1 + 9)?,
            tag::FIXEXT16 => self.discard(1 + 17)?,
            tag::EXT8 => {
                let len = self.payload(1, |b| usize::from(b.get_u8()))?;
                self.discard(1 + len)?;
            }
            tag::EXT16 => {
                let len = self.payload(2, |b| usize::from(b.get_u16()))?;
                self.discard(1 + len)?;
            }
            tag::EXT32 => {
                let len = len32(self.payload(4, |b| b.get_u32())?)?;
                self.discard(1 + len)?;
            }

            tag::STR8 | tag::BIN8 => {
                let len = self.payload(1, |b| usize::from(b.get_u8()))?;
                self.discard(len)?;
            }
            tag::STR16 | tag::BIN16 => {
                let len = self.payload(2, |b| usize::from(b.get_u16()))?;
                self.discard(len)?;
            }
            tag::STR32 | tag::BIN32 => {
                let len = len32(self.payload(4, |b| b.get_u32())?)?;
                self.discard(len)?;
            }

            tag::ARRAY16 => return self.payload(2, |b| u64::from(b.get_u16())),
            tag::ARRAY32 => return self.payload(4, |b| u64::from(b.get_u32())),
            tag::MAP16 => return self.payload(2, |b| 2 * u64::from(b.get_u16())),
            tag::MAP32 => return self.payload(4, |b| 2 * u64::from(b.get_u32())),
            _ => return Err(Error::UnknownTag(tag)),
        }
        Ok(0)
    }

    /// Skips the next value, including everything nested inside it.
    ///
    /// Returns the number of bytes skipped.
    pub fn skip(&mut self) -> Result<usize, Error> {
        let start = self.remaining();
        let mut pending: u64 = 1;
        while pending > 0 {
            pending -= 1;
            let children = self.skip_size()?;
            pending = pending.saturating_add(children);
        }
        let skipped = start - self.remaining();
        trace!(skipped, "skipped value");
        Ok(skipped)
    }
}
