use super::introspector::Introspector;
use super::span::{Position, Span};

/// Represent a value attached to the range [start, end)
/// Inclusive start, exclusive of end
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<P, V> {
    pub start: P,
    pub end: P,
    pub val: V,
}

impl<P: Position, V> Interval<P, V> {
    #[inline]
    pub fn span(&self) -> Span<P> {
        Span {
            start: self.start,
            end: self.end,
        }
    }

    #[inline]
    pub fn length(&self) -> P {
        self.end - self.start
    }

    /// Check if this interval overlaps `start .. end`
    #[inline]
    pub fn overlap(&self, start: P, end: P) -> bool {
        self.span().overlaps(&Span { start, end })
    }
}

/// Introspector reading the `start` and `end` fields of an [`Interval`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalSpan;

impl<P: Position, V> Introspector<Interval<P, V>> for IntervalSpan {
    type Position = P;

    #[inline]
    fn span(&self, value: &Interval<P, V>) -> Span<P> {
        value.span()
    }
}
