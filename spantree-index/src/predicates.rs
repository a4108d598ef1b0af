//! Query predicates with the `(value, start, length, introspector)` shape the
//! query engine expects.
//!
//! Every predicate here only matches values with `start <= query end` and
//! `end >= query start`, so all of them are safe to use with the pruned
//! [`crate::traversal::any_overlap`] search.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spantree_core::models::{Introspector, Position, Span};

#[inline]
fn query_span<P: Position>(start: P, length: P) -> Span<P> {
    Span {
        start,
        end: start.checked_add(&length).unwrap_or_else(P::max_value),
    }
}

/// The value's span shares at least one offset with the query range.
#[inline]
pub fn overlaps<T, I: Introspector<T>>(
    value: &T,
    start: I::Position,
    length: I::Position,
    introspector: &I,
) -> bool {
    introspector
        .span(value)
        .overlaps(&query_span(start, length))
}

/// The value's span overlaps or touches the query range.
#[inline]
pub fn intersects<T, I: Introspector<T>>(
    value: &T,
    start: I::Position,
    length: I::Position,
    introspector: &I,
) -> bool {
    introspector
        .span(value)
        .intersects(&query_span(start, length))
}

/// The value's span contains the whole query range.
#[inline]
pub fn contains<T, I: Introspector<T>>(
    value: &T,
    start: I::Position,
    length: I::Position,
    introspector: &I,
) -> bool {
    introspector
        .span(value)
        .contains(&query_span(start, length))
}

/// Selects one of the predicates above at runtime.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredicateKind {
    #[default]
    Overlaps,
    Intersects,
    Contains,
}

impl PredicateKind {
    #[inline]
    pub fn matches<T, I: Introspector<T>>(
        self,
        value: &T,
        start: I::Position,
        length: I::Position,
        introspector: &I,
    ) -> bool {
        match self {
            PredicateKind::Overlaps => overlaps(value, start, length, introspector),
            PredicateKind::Intersects => intersects(value, start, length, introspector),
            PredicateKind::Contains => contains(value, start, length, introspector),
        }
    }
}

impl FromStr for PredicateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overlaps" => Ok(PredicateKind::Overlaps),
            "intersects" => Ok(PredicateKind::Intersects),
            "contains" => Ok(PredicateKind::Contains),
            _ => Err(format!(
                "Invalid predicate: {}. Valid options are 'overlaps', 'intersects' or 'contains'",
                s
            )),
        }
    }
}

impl Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PredicateKind::Overlaps => "overlaps",
            PredicateKind::Intersects => "intersects",
            PredicateKind::Contains => "contains",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use spantree_core::models::{Interval, IntervalSpan};

    fn interval(start: i32, end: i32) -> Interval<i32, ()> {
        Interval { start, end, val: () }
    }

    #[rstest]
    #[case(PredicateKind::Overlaps, 10, 0, false)]
    #[case(PredicateKind::Intersects, 10, 0, true)]
    #[case(PredicateKind::Contains, 10, 0, true)]
    #[case(PredicateKind::Overlaps, 4, 3, true)]
    #[case(PredicateKind::Contains, 4, 3, false)]
    #[case(PredicateKind::Contains, 6, 3, true)]
    fn test_predicates_against_5_10(
        #[case] kind: PredicateKind,
        #[case] start: i32,
        #[case] length: i32,
        #[case] expected: bool,
    ) {
        assert_eq!(
            kind.matches(&interval(5, 10), start, length, &IntervalSpan),
            expected
        );
    }

    #[rstest]
    fn test_query_end_saturates() {
        assert_eq!(
            overlaps(&interval(i32::MAX - 1, i32::MAX), i32::MAX - 5, 100, &IntervalSpan),
            true
        );
    }

    #[rstest]
    fn test_parse_and_display() {
        assert_eq!("Contains".parse::<PredicateKind>(), Ok(PredicateKind::Contains));
        assert_eq!("nope".parse::<PredicateKind>().is_err(), true);
        assert_eq!(PredicateKind::Intersects.to_string(), "intersects");
    }
}
