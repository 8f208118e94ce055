//! Limits and compatibility switches for a [crate::Decoder].

use core::ops::{Bound, RangeBounds};

/// Configuration for limiting the range of a decoded length or size.
///
/// # Examples
///
/// ```
/// use commonware_msgpack::RangeCfg;
///
/// let cfg = RangeCfg::from(..=1024);
/// assert!(cfg.contains(&1024));
/// assert!(!cfg.contains(&1025));
///
/// let cfg = RangeCfg::from(1..);
/// assert!(!cfg.contains(&0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg<T: Copy + PartialOrd = usize> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Copy + PartialOrd> RangeCfg<T> {
    /// Creates a new `RangeCfg` from any type implementing `RangeBounds<T>`.
    pub fn new(r: impl RangeBounds<T>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Returns true if the value is within this range.
    pub fn contains(&self, value: &T) -> bool {
        match &self.start {
            Bound::Included(s) if value < s => return false,
            Bound::Excluded(s) if value <= s => return false,
            _ => {}
        }
        match &self.end {
            Bound::Included(e) if value > e => return false,
            Bound::Excluded(e) if value >= e => return false,
            _ => {}
        }
        true
    }
}

impl<T: Copy + PartialOrd> Default for RangeCfg<T> {
    fn default() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }
}

impl<T: Copy + PartialOrd> RangeBounds<T> for RangeCfg<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.end.as_ref()
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl<T: Copy + PartialOrd> From<$range> for RangeCfg<T> {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<T>,
    core::ops::RangeInclusive<T>,
    core::ops::RangeFrom<T>,
    core::ops::RangeTo<T>,
    core::ops::RangeToInclusive<T>
);

impl<T: Copy + PartialOrd> From<core::ops::RangeFull> for RangeCfg<T> {
    fn from(_: core::ops::RangeFull) -> Self {
        Self::default()
    }
}

/// Decoder configuration.
///
/// The default accepts any length or size the wire format can express. When
/// decoding untrusted input, bound `max_len` and `max_items` to limit how much
/// a single value can ask the decoder to allocate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Allowed byte lengths of `str` and `bin` values.
    pub max_len: RangeCfg,

    /// Allowed element counts of arrays and maps (pairs, not keys plus values).
    pub max_items: RangeCfg,

    /// Accept a fixarray tag as the length prefix of `str` and `bin` values.
    ///
    /// Some older writers emitted short strings and byte arrays this way.
    /// Leave disabled unless payloads from such a writer must be read.
    pub legacy_lengths: bool,
}

impl Config {
    /// Returns a configuration with both limits set to `..=max`.
    pub fn bounded(max: usize) -> Self {
        Self {
            max_len: (..=max).into(),
            max_items: (..=max).into(),
            legacy_lengths: false,
        }
    }
}
