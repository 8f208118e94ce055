//! Tag byte table and classification.
//!
//! Every encoded value starts with a single tag byte. Most tags are exact
//! matches against the constants below, but five families occupy whole
//! ranges of the byte space and carry part of their payload in the low bits:
//!
//! | Family          | Mask   | Pattern | Payload            |
//! |-----------------|--------|---------|--------------------|
//! | fixint          | `0x80` | `0x00`  | value (7 bits)     |
//! | negative fixint | `0xe0` | `0xe0`  | value (whole byte) |
//! | fixmap          | `0xf0` | `0x80`  | size (4 bits)      |
//! | fixarray        | `0xf0` | `0x90`  | size (4 bits)      |
//! | fixstr          | `0xe0` | `0xa0`  | length (5 bits)    |
//!
//! The predicates in this module are the only place these masks appear.

pub const NIL: u8 = 0xc0;
/// Reserved, never produced by a conformant encoder.
pub const NEVER_USED: u8 = 0xc1;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;
pub const EXT8: u8 = 0xc7;
pub const EXT16: u8 = 0xc8;
pub const EXT32: u8 = 0xc9;
pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;
pub const FIXEXT1: u8 = 0xd4;
pub const FIXEXT2: u8 = 0xd5;
pub const FIXEXT4: u8 = 0xd6;
pub const FIXEXT8: u8 = 0xd7;
pub const FIXEXT16: u8 = 0xd8;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

const FIXINT_MASK: u8 = 0x80;
const NEGATIVE_FIXINT_MASK: u8 = 0xe0;
const FIXMAP_MASK: u8 = 0xf0;
const FIXMAP_PATTERN: u8 = 0x80;
const FIXARRAY_PATTERN: u8 = 0x90;
const FIXSTR_MASK: u8 = 0xe0;
const FIXSTR_PATTERN: u8 = 0xa0;

/// Returns true if `tag` is a positive fixint (`0x00..=0x7f`).
#[inline]
pub const fn is_fixint(tag: u8) -> bool {
    tag & FIXINT_MASK == 0
}

/// Returns true if `tag` is a negative fixint (`0xe0..=0xff`).
#[inline]
pub const fn is_negative_fixint(tag: u8) -> bool {
    tag & NEGATIVE_FIXINT_MASK == NEGATIVE_FIXINT_MASK
}

/// Returns true if `tag` is a fixmap (`0x80..=0x8f`).
#[inline]
pub const fn is_fixmap(tag: u8) -> bool {
    tag & FIXMAP_MASK == FIXMAP_PATTERN
}

/// Returns true if `tag` is a fixarray (`0x90..=0x9f`).
#[inline]
pub const fn is_fixarray(tag: u8) -> bool {
    tag & FIXMAP_MASK == FIXARRAY_PATTERN
}

/// Returns true if `tag` is a fixstr (`0xa0..=0xbf`).
#[inline]
pub const fn is_fixstr(tag: u8) -> bool {
    tag & FIXSTR_MASK == FIXSTR_PATTERN
}

/// Size carried by a fixmap or fixarray tag.
#[inline]
pub const fn fix_size(tag: u8) -> usize {
    (tag & 0x0f) as usize
}

/// Length carried by a fixstr tag.
#[inline]
pub const fn fixstr_len(tag: u8) -> usize {
    (tag & 0x1f) as usize
}

/// The family a tag byte belongs to.
///
/// Fixed-range families are resolved through the predicates above, explicit
/// tags through an exact match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    FixInt,
    NegativeFixInt,
    FixMap,
    FixArray,
    FixStr,
    Nil,
    Bool,
    Bin,
    Ext,
    Float,
    UInt,
    Int,
    FixExt,
    Str,
    Array,
    Map,
    Unknown,
}

impl Family {
    /// Classifies a tag byte.
    pub const fn of(tag: u8) -> Self {
        if is_fixint(tag) {
            return Self::FixInt;
        }
        if is_negative_fixint(tag) {
            return Self::NegativeFixInt;
        }
        if is_fixmap(tag) {
            return Self::FixMap;
        }
        if is_fixarray(tag) {
            return Self::FixArray;
        }
        if is_fixstr(tag) {
            return Self::FixStr;
        }
        match tag {
            NIL => Self::Nil,
            FALSE | TRUE => Self::Bool,
            BIN8 | BIN16 | BIN32 => Self::Bin,
            EXT8 | EXT16 | EXT32 => Self::Ext,
            FLOAT32 | FLOAT64 => Self::Float,
            UINT8 | UINT16 | UINT32 | UINT64 => Self::UInt,
            INT8 | INT16 | INT32 | INT64 => Self::Int,
            FIXEXT1 | FIXEXT2 | FIXEXT4 | FIXEXT8 | FIXEXT16 => Self::FixExt,
            STR8 | STR16 | STR32 => Self::Str,
            ARRAY16 | ARRAY32 => Self::Array,
            MAP16 | MAP32 => Self::Map,
            _ => Self::Unknown,
        }
    }

    /// Human-readable name of the family.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FixInt => "fixint",
            Self::NegativeFixInt => "negative fixint",
            Self::FixMap => "fixmap",
            Self::FixArray => "fixarray",
            Self::FixStr => "fixstr",
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Bin => "bin",
            Self::Ext => "ext",
            Self::Float => "float",
            Self::UInt => "uint",
            Self::Int => "int",
            Self::FixExt => "fixext",
            Self::Str => "str",
            Self::Array => "array",
            Self::Map => "map",
            Self::Unknown => "unknown",
        }
    }
}

/// Human-readable name of the family `tag` belongs to.
#[inline]
pub const fn name(tag: u8) -> &'static str {
    Family::of(tag).name()
}
