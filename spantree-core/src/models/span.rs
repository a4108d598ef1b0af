use std::fmt::{self, Debug, Display};

use num_traits::PrimInt;

use crate::errors::{SpanError, SpanResult};

/// Integer types usable as span offsets. Signed and unsigned primitives both qualify.
pub trait Position: PrimInt + Debug + Display + Send + Sync {}

impl<P> Position for P where P: PrimInt + Debug + Display + Send + Sync {}

///
/// A half-open range `[start, end)` of positions.
///
/// A span with `start == end` is a point: it has no extent, but it still
/// overlaps any non-empty span that contains its offset.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span<P> {
    pub start: P,
    pub end: P,
}

impl<P: Position> Span<P> {
    /// Create a span from its bounds, rejecting `end < start`.
    pub fn new(start: P, end: P) -> SpanResult<Self> {
        if end < start {
            return Err(SpanError::InvertedSpan {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Span { start, end })
    }

    ///
    /// Create a span from a start offset and a length.
    ///
    /// # Errors
    /// - [`SpanError::NegativeLength`] when `length < 0`
    /// - [`SpanError::Overflow`] when `start + length` does not fit in `P`
    ///
    pub fn from_start_length(start: P, length: P) -> SpanResult<Self> {
        if length < P::zero() {
            return Err(SpanError::NegativeLength {
                start: start.to_string(),
                length: length.to_string(),
            });
        }
        let end = start
            .checked_add(&length)
            .ok_or_else(|| SpanError::Overflow {
                start: start.to_string(),
                length: length.to_string(),
            })?;
        Ok(Span { start, end })
    }

    #[inline]
    pub fn length(&self) -> P {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    ///
    /// Check whether two spans share at least one offset.
    ///
    /// Non-empty spans overlap when their half-open ranges intersect. A point
    /// overlaps a span that contains it, and two points overlap only when they
    /// sit at the same offset.
    ///
    #[inline]
    pub fn overlaps(&self, other: &Span<P>) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => self.start == other.start,
            (true, false) => other.start <= self.start && self.start < other.end,
            (false, true) => self.start <= other.start && other.start < self.end,
            (false, false) => self.start < other.end && other.start < self.end,
        }
    }

    /// Like [`Span::overlaps`], but spans that merely touch also count.
    #[inline]
    pub fn intersects(&self, other: &Span<P>) -> bool {
        other.start <= self.end && self.start <= other.end
    }

    /// Check whether `other` lies entirely within this span.
    #[inline]
    pub fn contains(&self, other: &Span<P>) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl<P: Position> Display for Span<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
