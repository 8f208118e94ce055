//! Arrays and maps decoded through caller-supplied element readers.
//!
//! Container reads are fail-fast: the first element error is returned as-is
//! and the partially decoded container is dropped.

use crate::{Decoder, Error};
use bytes::Buf;
use std::{collections::HashMap, hash::Hash};

impl<B: Buf> Decoder<B> {
    /// Reads an array, decoding each element with `read`.
    ///
    /// `read` is called once per element in encoding order and receives the
    /// element's index.
    ///
    /// ```
    /// use commonware_msgpack::Decoder;
    ///
    /// let mut decoder = Decoder::new(&[0x92, 0x01, 0x02][..]);
    /// let items = decoder.read_array(|d, _| d.read_u8()).unwrap();
    /// assert_eq!(items, vec![1, 2]);
    /// ```
    pub fn read_array<T, F>(&mut self, mut read: F) -> Result<Vec<T>, Error>
    where
        F: FnMut(&mut Self, usize) -> Result<T, Error>,
    {
        let len = self.read_array_size()?;

        // Every element takes at least one byte
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for index in 0..len {
            items.push(read(self, index)?);
        }
        Ok(items)
    }

    /// Reads a map, decoding each key with `read_key` and then its value with
    /// `read_value`.
    ///
    /// A repeated key replaces the value stored for it earlier.
    pub fn read_map<K, V, FK, FV>(
        &mut self,
        mut read_key: FK,
        mut read_value: FV,
    ) -> Result<HashMap<K, V>, Error>
    where
        K: Eq + Hash,
        FK: FnMut(&mut Self) -> Result<K, Error>,
        FV: FnMut(&mut Self) -> Result<V, Error>,
    {
        let len = self.read_map_size()?;

        // Every pair takes at least two bytes
        let mut map = HashMap::with_capacity(len.min(self.remaining() / 2));
        for _ in 0..len {
            let key = read_key(self)?;
            let value = read_value(self)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Reads an array, or `None` if the next value is nil.
    pub fn read_nullable_array<T, F>(&mut self, read: F) -> Result<Option<Vec<T>>, Error>
    where
        F: FnMut(&mut Self, usize) -> Result<T, Error>,
    {
        if self.is_next_nil()? {
            return Ok(None);
        }
        self.read_array(read).map(Some)
    }

    /// Reads a map, or `None` if the next value is nil.
    pub fn read_nullable_map<K, V, FK, FV>(
        &mut self,
        read_key: FK,
        read_value: FV,
    ) -> Result<Option<HashMap<K, V>>, Error>
    where
        K: Eq + Hash,
        FK: FnMut(&mut Self) -> Result<K, Error>,
        FV: FnMut(&mut Self) -> Result<V, Error>,
    {
        if self.is_next_nil()? {
            return Ok(None);
        }
        self.read_map(read_key, read_value).map(Some)
    }
}
