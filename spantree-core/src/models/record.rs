use std::fmt::{self, Display};

use super::introspector::Introspector;
use super::span::Span;

///
/// One line of an interval file: a labelled span inside a named document.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanRecord {
    pub document: String,
    pub start: i64,
    pub length: i64,

    pub label: Option<String>,
}

impl SpanRecord {
    /// One past the last offset, saturating at `i64::MAX`.
    pub fn end(&self) -> i64 {
        self.start.checked_add(self.length).unwrap_or(i64::MAX)
    }

    ///
    /// Get file string of the record
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.document,
            self.start,
            self.length,
            self.label
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }
}

impl Display for SpanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// Introspector for [`SpanRecord`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSpan;

impl Introspector<SpanRecord> for RecordSpan {
    type Position = i64;

    #[inline]
    fn span(&self, value: &SpanRecord) -> Span<i64> {
        Span {
            start: value.start,
            end: value.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(10, 5, 15)]
    #[case(i64::MAX, 1, i64::MAX)]
    #[case(i64::MAX - 1, i64::MAX, i64::MAX)]
    fn test_end_saturates(#[case] start: i64, #[case] length: i64, #[case] end: i64) {
        let record = SpanRecord {
            document: "main.rs".to_string(),
            start,
            length,
            label: None,
        };
        assert_eq!(record.end(), end);
        assert_eq!(RecordSpan.span(&record), Span { start, end });
    }
}
