pub mod interval;
pub mod introspector;
pub mod record;
pub mod span;

// re-export for cleaner imports
pub use self::interval::{Interval, IntervalSpan};
pub use self::introspector::{Introspector, SpanItself};
pub use self::record::{RecordSpan, SpanRecord};
pub use self::span::{Position, Span};
