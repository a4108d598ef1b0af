use super::span::{Position, Span};

///
/// Extracts the span of a stored value.
///
/// Implementations must be pure: for the lifetime of any index built with an
/// introspector, the span it reports for a given value must never change.
/// Introspectors are usually zero-sized unit structs, so passing them by value
/// costs nothing and lets every query monomorphize over the concrete type.
///
pub trait Introspector<T> {
    type Position: Position;

    fn span(&self, value: &T) -> Span<Self::Position>;

    #[inline]
    fn start(&self, value: &T) -> Self::Position {
        self.span(value).start
    }

    #[inline]
    fn end(&self, value: &T) -> Self::Position {
        self.span(value).end
    }
}

impl<T, I> Introspector<T> for &I
where
    I: Introspector<T> + ?Sized,
{
    type Position = I::Position;

    #[inline]
    fn span(&self, value: &T) -> Span<Self::Position> {
        (**self).span(value)
    }
}

/// The identity introspector: a [`Span`] is its own span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanItself;

impl<P: Position> Introspector<Span<P>> for SpanItself {
    type Position = P;

    #[inline]
    fn span(&self, value: &Span<P>) -> Span<P> {
        *value
    }
}
