//! Deserialize MessagePack data.
//!
//! # Overview
//!
//! A decoder for the [MessagePack](https://msgpack.org) binary format designed to safely:
//! - Decode untrusted input into typed values, rejecting any value that does not fit its target
//! - Skip over values of any shape without decoding or allocating them
//!
//! Every value starts with a tag byte that determines its type (see [tag]). The [Decoder] wraps a
//! fully resident buffer (anything implementing [bytes::Buf]) and offers one operation per target
//! type. All operations return a [Result]; the [UnwrapDecoder] wraps the same operations but
//! panics instead, for buffers already known to be well-formed.
//!
//! # Supported Types
//!
//! - Integers: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, read through a canonical
//!   64-bit reader and then checked against the target width
//! - Floats: `f32` (narrowing float64 when it fits), `f64` (widening float32)
//! - `bool`, `String`, [bytes::Bytes]
//! - Arrays and maps through caller-supplied element readers, or `Vec<T>` and `HashMap<K, V>`
//! - Nullable values: `Option<T>` reads nil as `None`
//!
//! # Example
//!
//! ```
//! use commonware_msgpack::{Decode, Decoder, Error};
//!
//! // {"id": 7, "tags": ["a", "b"], "parent": nil}
//! let encoded: &[u8] = &[
//!     0x83,
//!     0xa2, b'i', b'd', 0x07,
//!     0xa4, b't', b'a', b'g', b's', 0x92, 0xa1, b'a', 0xa1, b'b',
//!     0xa6, b'p', b'a', b'r', b'e', b'n', b't', 0xc0,
//! ];
//!
//! let mut decoder = Decoder::new(encoded);
//! let size = decoder.read_map_size()?;
//! assert_eq!(size, 3);
//! assert_eq!(decoder.read_string()?, "id");
//! assert_eq!(decoder.read_u32()?, 7);
//! assert_eq!(decoder.read_string()?, "tags");
//! let tags = decoder.read_array(|d, _| d.read_string())?;
//! assert_eq!(tags, ["a", "b"]);
//! assert_eq!(decoder.read_string()?, "parent");
//! assert!(decoder.is_next_nil()?);
//! assert_eq!(decoder.remaining(), 0);
//!
//! // Skip the whole map in one call
//! let mut decoder = Decoder::new(encoded);
//! assert_eq!(decoder.skip()?, encoded.len());
//!
//! // Values that do not fit are rejected
//! assert!(matches!(
//!     i8::decode(&[0xcc, 0xff][..]),
//!     Err(Error::IntegerOverflow { value: 255, bits: 8 })
//! ));
//! # Ok::<(), Error>(())
//! ```

pub mod config;
mod container;
pub mod decoder;
pub mod error;
pub mod read;
mod skip;
pub mod tag;
pub mod unwrap;
pub mod util;

// Re-export main types and traits
pub use config::{Config, RangeCfg};
pub use decoder::Decoder;
pub use error::Error;
pub use read::{Decode, Read};
pub use unwrap::UnwrapDecoder;
