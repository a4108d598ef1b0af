//! Core models shared by the spantree crates.
//!
//! - [`models::Span`]: a half-open `[start, end)` range over any primitive integer
//! - [`models::Introspector`]: extracts the span of a stored value
//! - [`models::Interval`] and [`models::SpanRecord`]: ready-made payloads
//! - [`utils`]: readers for tab separated interval files (optionally gzip'd)

pub mod errors;
pub mod models;
pub mod utils;
