//! A decoder that panics on malformed input.
//!
//! [UnwrapDecoder] mirrors every operation of [Decoder] but returns plain
//! values. Any error panics with the name of the failed operation. Use it
//! only for buffers whose shape is already known to be valid, for example
//! data this process encoded itself.

use crate::{Config, Decoder, Error, Read};
use bytes::{Buf, Bytes};
use std::{collections::HashMap, hash::Hash};
use tracing::error;

#[track_caller]
fn unwrap<T>(result: Result<T, Error>, op: &'static str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(op, ?err, "malformed input");
            panic!("{op}: {err}");
        }
    }
}

// Generates methods forwarding to the fallible decoder.
macro_rules! forward {
    ($($name:ident -> $type:ty),* $(,)?) => {
        $(
            #[doc = concat!("See [Decoder::", stringify!($name), "]. Panics on error.")]
            #[track_caller]
            pub fn $name(&mut self) -> $type {
                unwrap(self.inner.$name(), stringify!($name))
            }
        )*
    };
}

/// Panicking counterpart of [Decoder].
#[derive(Clone, Debug)]
pub struct UnwrapDecoder<B: Buf> {
    inner: Decoder<B>,
}

impl<B: Buf> From<Decoder<B>> for UnwrapDecoder<B> {
    fn from(inner: Decoder<B>) -> Self {
        Self { inner }
    }
}

impl<B: Buf> UnwrapDecoder<B> {
    /// Creates a decoder with the default [Config].
    pub fn new(buf: B) -> Self {
        Decoder::new(buf).into()
    }

    /// Creates a decoder enforcing the limits in `cfg`.
    pub fn with_config(buf: B, cfg: Config) -> Self {
        Decoder::with_config(buf, cfg).into()
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    /// Returns the wrapped fallible decoder.
    pub fn into_inner(self) -> Decoder<B> {
        self.inner
    }

    forward! {
        peek_tag -> u8,
        read_i64 -> i64,
        read_i32 -> i32,
        read_i16 -> i16,
        read_i8 -> i8,
        read_u64 -> u64,
        read_u32 -> u32,
        read_u16 -> u16,
        read_u8 -> u8,
        read_bool -> bool,
        read_f64 -> f64,
        read_f32 -> f32,
        is_next_nil -> bool,
        read_string_length -> usize,
        read_string -> String,
        read_bin_length -> usize,
        read_bytes -> Bytes,
        read_array_size -> usize,
        read_map_size -> usize,
        skip_size -> u64,
        skip -> usize,
    }

    /// Reads any type implementing [Read]. Panics on error.
    #[track_caller]
    pub fn read<T: Read>(&mut self) -> T {
        unwrap(self.inner.read(), "read")
    }

    /// See [Decoder::read_array]. Panics on error.
    #[track_caller]
    pub fn read_array<T, F>(&mut self, mut read: F) -> Vec<T>
    where
        F: FnMut(&mut Self, usize) -> T,
    {
        let len = self.read_array_size();
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for index in 0..len {
            items.push(read(self, index));
        }
        items
    }

    /// See [Decoder::read_map]. Panics on error.
    #[track_caller]
    pub fn read_map<K, V, FK, FV>(
        &mut self,
        mut read_key: FK,
        mut read_value: FV,
    ) -> HashMap<K, V>
    where
        K: Eq + Hash,
        FK: FnMut(&mut Self) -> K,
        FV: FnMut(&mut Self) -> V,
    {
        let len = self.read_map_size();
        let mut map = HashMap::with_capacity(len.min(self.remaining() / 2));
        for _ in 0..len {
            let key = read_key(self);
            let value = read_value(self);
            map.insert(key, value);
        }
        map
    }

    /// See [Decoder::read_nullable_array]. Panics on error.
    #[track_caller]
    pub fn read_nullable_array<T, F>(&mut self, read: F) -> Option<Vec<T>>
    where
        F: FnMut(&mut Self, usize) -> T,
    {
        if self.is_next_nil() {
            return None;
        }
        Some(self.read_array(read))
    }

    /// See [Decoder::read_nullable_map]. Panics on error.
    #[track_caller]
    pub fn read_nullable_map<K, V, FK, FV>(
        &mut self,
        read_key: FK,
        read_value: FV,
    ) -> Option<HashMap<K, V>>
    where
        K: Eq + Hash,
        FK: FnMut(&mut Self) -> K,
        FV: FnMut(&mut Self) -> V,
    {
        if self.is_next_nil() {
            return None;
        }
        Some(self.read_map(read_key, read_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        let mut decoder = UnwrapDecoder::new(&[0x05, 0xc3, 0xa2, b'o', b'k', 0xc0][..]);
        assert_eq!(decoder.read_i64(), 5);
        assert!(decoder.read_bool());
        assert_eq!(decoder.read_string(), "ok");
        assert!(decoder.is_next_nil());
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_containers() {
        let mut decoder = UnwrapDecoder::new(&[0x92, 0x01, 0x02, 0x81, 0x01, 0xc0, 0xc0][..]);
        assert_eq!(decoder.read_array(|d, _| d.read_u8()), vec![1, 2]);
        let map = decoder.read_map(|d| d.read_u8(), |d| d.read::<Option<u8>>());
        assert_eq!(map[&1], None);
        assert_eq!(decoder.read_nullable_array(|d, _| d.read_u8()), None);
    }

    #[test]
    fn test_skip() {
        let mut decoder = UnwrapDecoder::new(&[0x91, 0x91, 0x01, 0x02][..]);
        assert_eq!(decoder.skip(), 3);
        assert_eq!(decoder.read_u8(), 2);
    }

    #[test]
    #[should_panic(expected = "read_i8: integer overflow: 255 does not fit in 8 bits")]
    fn test_panics_on_overflow() {
        UnwrapDecoder::new(&[0xcc, 0xff][..]).read_i8();
    }

    #[test]
    #[should_panic(expected = "read_bool: bad tag 0x01 (fixint) for bool")]
    fn test_panics_on_bad_tag() {
        UnwrapDecoder::new(&[0x01][..]).read_bool();
    }

    #[test]
    #[should_panic(expected = "read_u8: unexpected end of buffer")]
    fn test_panics_inside_array() {
        let mut decoder = UnwrapDecoder::new(&[0x92, 0x01][..]);
        decoder.read_array(|d, _| d.read_u8());
    }
}
