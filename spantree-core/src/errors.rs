use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    #[error("Span starting at {start} has negative length {length}")]
    NegativeLength { start: String, length: String },

    #[error("Span end {end} precedes its start {start}")]
    InvertedSpan { start: String, end: String },

    #[error("Span starting at {start} with length {length} overflows its position type")]
    Overflow { start: String, length: String },
}

pub type SpanResult<T> = std::result::Result<T, SpanError>;

#[derive(Error, Debug)]
pub enum IntervalFileError {
    #[error("Error parsing interval on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Invalid interval on line {line}: {source}")]
    InvalidSpan { line: usize, source: SpanError },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
