//! Fallible decoding of scalars, strings, binary data, and container headers.
//!
//! # Integers
//!
//! [`Decoder::read_i64`] and [`Decoder::read_u64`] are the canonical integer
//! readers: they accept every integer tag that can represent a value of their
//! signedness. The narrower readers decode through the canonical reader of the
//! same signedness and then check the result against the target width, so
//! `[0xcc, 0xff]` (uint8 255) reads fine as `u16` but fails as `i8`.
//!
//! # Position after an error
//!
//! Tags are peeked before they are consumed. An operation that rejects the
//! next tag ([`Error::BadTag`], [`Error::InvalidLength`]) leaves the position
//! untouched, as does a fixed-width payload that is cut short. After any other
//! error the position is unspecified.

use crate::{
    tag::{self, Family},
    util::{at_least, len32, peek},
    Config, Error, Read,
};
use bytes::{Buf, Bytes};

/// Reads values from a buffer holding MessagePack data.
///
/// The decoder owns the buffer for its entire lifetime and tracks nothing but
/// the read position (the buffer's own cursor). It performs no I/O.
#[derive(Clone, Debug)]
pub struct Decoder<B: Buf> {
    buf: B,
    cfg: Config,
}

impl<B: Buf> Decoder<B> {
    /// Creates a decoder with the default (unbounded) [Config].
    pub fn new(buf: B) -> Self {
        Self::with_config(buf, Config::default())
    }

    /// Creates a decoder enforcing the limits in `cfg`.
    pub fn with_config(buf: B, cfg: Config) -> Self {
        Self { buf, cfg }
    }

    /// Returns the configuration of this decoder.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Consumes the decoder, returning the unread remainder of the buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Returns the next tag byte without consuming it.
    pub fn peek_tag(&self) -> Result<u8, Error> {
        peek(&self.buf)
    }

    /// Reads any type implementing [Read].
    pub fn read<T: Read>(&mut self) -> Result<T, Error> {
        T::read(self)
    }

    /// Consumes a tag that has already been peeked.
    #[inline]
    pub(crate) fn consume_tag(&mut self) {
        self.buf.advance(1);
    }

    /// Consumes the peeked tag and a `width`-byte payload read by `get`.
    ///
    /// Nothing is consumed unless the tag and payload are both present.
    #[inline]
    pub(crate) fn payload<T>(
        &mut self,
        width: usize,
        get: impl FnOnce(&mut B) -> T,
    ) -> Result<T, Error> {
        at_least(&mut self.buf, 1 + width)?;
        self.buf.advance(1);
        Ok(get(&mut self.buf))
    }

    /// Discards `len` bytes.
    #[inline]
    pub(crate) fn discard(&mut self, len: usize) -> Result<(), Error> {
        crate::util::discard(&mut self.buf, len)
    }

    fn bad_tag(tag: u8, expected: &'static str) -> Error {
        Error::BadTag {
            tag,
            family: tag::name(tag),
            expected,
        }
    }

    fn invalid_length(tag: u8) -> Error {
        Error::InvalidLength {
            tag,
            family: tag::name(tag),
        }
    }

    // ----- Integers -----

    /// Reads a signed integer from any integer tag.
    ///
    /// A uint64 above [i64::MAX] fails with [Error::IntegerOverflow].
    pub fn read_i64(&mut self) -> Result<i64, Error> {
        let tag = self.peek_tag()?;
        if tag::is_fixint(tag) || tag::is_negative_fixint(tag) {
            self.consume_tag();
            return Ok(i64::from(tag as i8));
        }
        match tag {
            tag::INT8 => self.payload(1, |b| i64::from(b.get_i8())),
            tag::INT16 => self.payload(2, |b| i64::from(b.get_i16())),
            tag::INT32 => self.payload(4, |b| i64::from(b.get_i32())),
            tag::INT64 => self.payload(8, |b| b.get_i64()),
            tag::UINT8 => self.payload(1, |b| i64::from(b.get_u8())),
            tag::UINT16 => self.payload(2, |b| i64::from(b.get_u16())),
            tag::UINT32 => self.payload(4, |b| i64::from(b.get_u32())),
            tag::UINT64 => {
                let value = self.payload(8, |b| b.get_u64())?;
                i64::try_from(value).map_err(|_| Error::IntegerOverflow {
                    value: i128::from(value),
                    bits: i64::BITS,
                })
            }
            _ => Err(Self::bad_tag(tag, "int")),
        }
    }

    /// Reads an unsigned integer from a fixint, uint, or non-negative int tag.
    ///
    /// Negative fixints are rejected as [Error::BadTag]; a negative value
    /// behind a sized int tag fails with [Error::IntegerUnderflow].
    pub fn read_u64(&mut self) -> Result<u64, Error> {
        let tag = self.peek_tag()?;
        if tag::is_fixint(tag) {
            self.consume_tag();
            return Ok(u64::from(tag));
        }
        let signed = match tag {
            tag::UINT8 => return self.payload(1, |b| u64::from(b.get_u8())),
            tag::UINT16 => return self.payload(2, |b| u64::from(b.get_u16())),
            tag::UINT32 => return self.payload(4, |b| u64::from(b.get_u32())),
            tag::UINT64 => return self.payload(8, |b| b.get_u64()),
            tag::INT8 => self.payload(1, |b| i64::from(b.get_i8()))?,
            tag::INT16 => self.payload(2, |b| i64::from(b.get_i16()))?,
            tag::INT32 => self.payload(4, |b| i64::from(b.get_i32()))?,
            tag::INT64 => self.payload(8, |b| b.get_i64())?,
            _ => return Err(Self::bad_tag(tag, "uint")),
        };
        u64::try_from(signed).map_err(|_| Error::IntegerUnderflow {
            value: i128::from(signed),
            bits: u64::BITS,
        })
    }

    // ----- Scalars -----

    /// Reads a boolean. Only the `true` and `false` tags are accepted.
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        let tag = self.peek_tag()?;
        let value = match tag {
            tag::TRUE => true,
            tag::FALSE => false,
            _ => return Err(Self::bad_tag(tag, "bool")),
        };
        self.consume_tag();
        Ok(value)
    }

    /// Reads a float64, widening a float32 if necessary.
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let tag = self.peek_tag()?;
        match tag {
            tag::FLOAT64 => self.payload(8, |b| b.get_f64()),
            tag::FLOAT32 => self.payload(4, |b| f64::from(b.get_f32())),
            _ => Err(Self::bad_tag(tag, "float64")),
        }
    }

    /// Reads a float32, narrowing a float64 if necessary.
    ///
    /// A finite float64 beyond the float32 range is clamped to [f32::MAX] (or
    /// [f32::MIN]) when it exceeds it by no more than [f32::EPSILON]. Anything
    /// further out fails with [Error::FloatOverflow].
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        let tag = self.peek_tag()?;
        match tag {
            tag::FLOAT32 => self.payload(4, |b| b.get_f32()),
            tag::FLOAT64 => narrow(self.payload(8, |b| b.get_f64())?),
            _ => Err(Self::bad_tag(tag, "float32")),
        }
    }

    /// Consumes the next byte and returns true if it is the nil tag.
    ///
    /// Any other tag is left in place.
    pub fn is_next_nil(&mut self) -> Result<bool, Error> {
        if self.peek_tag()? != tag::NIL {
            return Ok(false);
        }
        self.consume_tag();
        Ok(true)
    }

    // ----- Lengths -----

    /// Reads the byte length of a `str` value.
    pub fn read_string_length(&mut self) -> Result<usize, Error> {
        let tag = self.peek_tag()?;
        let len = match Family::of(tag) {
            Family::FixStr => {
                self.consume_tag();
                tag::fixstr_len(tag)
            }
            Family::FixArray if self.cfg.legacy_lengths => {
                self.consume_tag();
                tag::fix_size(tag)
            }
            _ => match tag {
                tag::STR8 => self.payload(1, |b| usize::from(b.get_u8()))?,
                tag::STR16 => self.payload(2, |b| usize::from(b.get_u16()))?,
                tag::STR32 => len32(self.payload(4, |b| b.get_u32())?)?,
                _ => return Err(Self::invalid_length(tag)),
            },
        };
        self.check_len(len, "str")
    }

    /// Reads the byte length of a `bin` value. Nil reads as an empty value.
    pub fn read_bin_length(&mut self) -> Result<usize, Error> {
        let tag = self.peek_tag()?;
        let len = match Family::of(tag) {
            Family::Nil => {
                self.consume_tag();
                0
            }
            Family::FixArray if self.cfg.legacy_lengths => {
                self.consume_tag();
                tag::fix_size(tag)
            }
            _ => match tag {
                tag::BIN8 => self.payload(1, |b| usize::from(b.get_u8()))?,
                tag::BIN16 => self.payload(2, |b| usize::from(b.get_u16()))?,
                tag::BIN32 => len32(self.payload(4, |b| b.get_u32())?)?,
                _ => return Err(Self::invalid_length(tag)),
            },
        };
        self.check_len(len, "bin")
    }

    /// Reads the element count of an array. Nil reads as an empty array.
    pub fn read_array_size(&mut self) -> Result<usize, Error> {
        let tag = self.peek_tag()?;
        let size = match Family::of(tag) {
            Family::Nil => {
                self.consume_tag();
                0
            }
            Family::FixArray => {
                self.consume_tag();
                tag::fix_size(tag)
            }
            _ => match tag {
                tag::ARRAY16 => self.payload(2, |b| usize::from(b.get_u16()))?,
                tag::ARRAY32 => len32(self.payload(4, |b| b.get_u32())?)?,
                _ => return Err(Self::invalid_length(tag)),
            },
        };
        self.check_items(size, "array")
    }

    /// Reads the number of key/value pairs of a map.
    pub fn read_map_size(&mut self) -> Result<usize, Error> {
        let tag = self.peek_tag()?;
        let size = if tag::is_fixmap(tag) {
            self.consume_tag();
            tag::fix_size(tag)
        } else {
            match tag {
                tag::MAP16 => self.payload(2, |b| usize::from(b.get_u16()))?,
                tag::MAP32 => len32(self.payload(4, |b| b.get_u32())?)?,
                _ => return Err(Self::invalid_length(tag)),
            }
        };
        self.check_items(size, "map")
    }

    fn check_len(&self, len: usize, kind: &'static str) -> Result<usize, Error> {
        if !self.cfg.max_len.contains(&len) {
            return Err(Error::LengthExceeded { found: len, kind });
        }
        Ok(len)
    }

    fn check_items(&self, size: usize, kind: &'static str) -> Result<usize, Error> {
        if !self.cfg.max_items.contains(&size) {
            return Err(Error::LengthExceeded { found: size, kind });
        }
        Ok(size)
    }

    // ----- Strings and bytes -----

    /// Reads a UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, Error> {
        let len = self.read_string_length()?;
        at_least(&mut self.buf, len)?;
        let bytes = self.buf.copy_to_bytes(len);
        Ok(std::str::from_utf8(&bytes)?.to_owned())
    }

    /// Reads a byte array. Nil reads as an empty array.
    ///
    /// When the underlying buffer is [Bytes], the result shares its memory.
    pub fn read_bytes(&mut self) -> Result<Bytes, Error> {
        let len = self.read_bin_length()?;
        at_least(&mut self.buf, len)?;
        Ok(self.buf.copy_to_bytes(len))
    }
}

// Generates the narrow integer readers on top of a canonical 64-bit reader.
macro_rules! impl_narrow {
    ($canonical:ident, $($name:ident => $type:ty),* $(,)?) => {
        impl<B: Buf> Decoder<B> {
            $(
                #[doc = concat!("Reads an integer that must fit in `", stringify!($type), "`.")]
                pub fn $name(&mut self) -> Result<$type, Error> {
                    let value = self.$canonical().map_err(|err| with_bits(err, <$type>::BITS))?;
                    <$type>::try_from(value).map_err(|_| {
                        let value = i128::from(value);
                        let bits = <$type>::BITS;
                        if value < 0 {
                            Error::IntegerUnderflow { value, bits }
                        } else {
                            Error::IntegerOverflow { value, bits }
                        }
                    })
                }
            )*
        }
    };
}

impl_narrow!(read_i64, read_i8 => i8, read_i16 => i16, read_i32 => i32);
impl_narrow!(read_u64, read_u8 => u8, read_u16 => u16, read_u32 => u32);

/// Reports a range error from the canonical reader against the narrower width.
fn with_bits(err: Error, bits: u32) -> Error {
    match err {
        Error::IntegerOverflow { value, .. } => Error::IntegerOverflow { value, bits },
        Error::IntegerUnderflow { value, .. } => Error::IntegerUnderflow { value, bits },
        err => err,
    }
}

fn narrow(value: f64) -> Result<f32, Error> {
    const MAX: f64 = f32::MAX as f64;
    const TOLERANCE: f64 = f32::EPSILON as f64;

    let magnitude = value.abs();
    if !value.is_finite() || magnitude <= MAX {
        return Ok(value as f32);
    }
    if magnitude - MAX > TOLERANCE {
        return Err(Error::FloatOverflow(value));
    }
    Ok(if value > 0.0 { f32::MAX } else { f32::MIN })
}
