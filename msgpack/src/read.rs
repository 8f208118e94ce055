//! Core decoding traits and implementations

use crate::{Config, Decoder, Error};
use bytes::{Buf, Bytes};
use std::{collections::HashMap, hash::Hash};
use tracing::debug;

/// Trait for types that can be read from a [Decoder].
pub trait Read: Sized {
    /// Reads a value, consuming the necessary bytes.
    fn read<B: Buf>(decoder: &mut Decoder<B>) -> Result<Self, Error>;
}

/// Trait for types that can be decoded from a buffer, ensuring the entire buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value using the default [Config].
    ///
    /// (Provided method).
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_cfg(buf, Config::default())
    }

    /// Decodes a value enforcing the limits in `cfg`, failing with
    /// [Error::ExtraData] if any bytes are left over.
    ///
    /// (Provided method).
    fn decode_cfg(buf: impl Buf, cfg: Config) -> Result<Self, Error> {
        let mut decoder = Decoder::with_config(buf, cfg);
        let result = Self::read(&mut decoder)?;

        // Check that the buffer is fully consumed.
        let remaining = decoder.remaining();
        if remaining > 0 {
            debug!(remaining, "trailing bytes after value");
            return Err(Error::ExtraData(remaining));
        }
        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

macro_rules! impl_read {
    ($type:ty, $read_method:ident) => {
        impl Read for $type {
            #[inline]
            fn read<B: Buf>(decoder: &mut Decoder<B>) -> Result<Self, Error> {
                decoder.$read_method()
            }
        }
    };
}

impl_read!(u8, read_u8);
impl_read!(u16, read_u16);
impl_read!(u32, read_u32);
impl_read!(u64, read_u64);
impl_read!(i8, read_i8);
impl_read!(i16, read_i16);
impl_read!(i32, read_i32);
impl_read!(i64, read_i64);
impl_read!(f32, read_f32);
impl_read!(f64, read_f64);
impl_read!(bool, read_bool);
impl_read!(String, read_string);
impl_read!(Bytes, read_bytes);

impl<T: Read> Read for Vec<T> {
    #[inline]
    fn read<B: Buf>(decoder: &mut Decoder<B>) -> Result<Self, Error> {
        decoder.read_array(|d, _| T::read(d))
    }
}

impl<K: Read + Eq + Hash, V: Read> Read for HashMap<K, V> {
    #[inline]
    fn read<B: Buf>(decoder: &mut Decoder<B>) -> Result<Self, Error> {
        decoder.read_map(|d| K::read(d), |d| V::read(d))
    }
}

// Nil reads as `None`
impl<T: Read> Read for Option<T> {
    #[inline]
    fn read<B: Buf>(decoder: &mut Decoder<B>) -> Result<Self, Error> {
        if decoder.is_next_nil()? {
            return Ok(None);
        }
        T::read(decoder).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(u8::decode(&[0x05][..]), Ok(5));
        assert_eq!(i64::decode(&[0xd0, 0x80][..]), Ok(-128));
        assert_eq!(bool::decode(&[0xc3][..]), Ok(true));
        assert_eq!(String::decode(&[0xa2, b'h', b'i'][..]), Ok("hi".to_string()));
    }

    #[test]
    fn test_extra_data() {
        assert_eq!(u8::decode(&[0x01, 0x02][..]), Err(Error::ExtraData(1)));
    }

    #[test]
    fn test_insufficient_buffer() {
        assert_eq!(u32::decode(&[0xce, 0x01][..]), Err(Error::EndOfBuffer));
    }

    #[test]
    fn test_option() {
        assert_eq!(Option::<u8>::decode(&[0xc0][..]), Ok(None));
        assert_eq!(Option::<u8>::decode(&[0x2a][..]), Ok(Some(42)));

        // Nil inside an array
        let decoded = Vec::<Option<u8>>::decode(&[0x92, 0xc0, 0x01][..]).unwrap();
        assert_eq!(decoded, vec![None, Some(1)]);
    }

    #[test]
    fn test_collections() {
        let decoded = Vec::<u16>::decode(&[0x93, 0x01, 0xcc, 0xff, 0xcd, 0x01, 0x00][..]).unwrap();
        assert_eq!(decoded, vec![1, 255, 256]);

        let decoded =
            HashMap::<String, Vec<bool>>::decode(&[0x81, 0xa1, b'k', 0x92, 0xc3, 0xc2][..])
                .unwrap();
        assert_eq!(decoded["k"], vec![true, false]);
    }

    #[test]
    fn test_decode_cfg() {
        let encoded = [0x93, 0x01, 0x02, 0x03];
        assert!(Vec::<u8>::decode_cfg(&encoded[..], Config::bounded(3)).is_ok());
        assert_eq!(
            Vec::<u8>::decode_cfg(&encoded[..], Config::bounded(2)),
            Err(Error::LengthExceeded {
                found: 3,
                kind: "array"
            })
        );
    }
}
