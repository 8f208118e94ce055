//! Error types for decoding operations

use thiserror::Error;

/// Error type for decoding operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("bad tag 0x{tag:02x} ({family}) for {expected}")]
    BadTag {
        tag: u8,
        family: &'static str,
        expected: &'static str,
    },
    #[error("integer overflow: {value} does not fit in {bits} bits")]
    IntegerOverflow { value: i128, bits: u32 },
    #[error("integer underflow: {value} does not fit in unsigned {bits} bits")]
    IntegerUnderflow { value: i128, bits: u32 },
    #[error("float overflow: {0} does not fit in 32 bits")]
    FloatOverflow(f64),
    #[error("invalid length tag 0x{tag:02x} ({family})")]
    InvalidLength { tag: u8, family: &'static str },
    #[error("{kind} length exceeded: {found}")]
    LengthExceeded { found: usize, kind: &'static str },
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("unknown tag 0x{0:02x}")]
    UnknownTag(u8),
}
