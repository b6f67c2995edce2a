use std::fmt;

/// An offset into the scanned input, counted in Unicode scalar values (not bytes).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub usize);

impl Position {
    pub const fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A [`Span`] represents a contiguous, half-open region `[lo, hi)` of the input. It is used to
/// correspond a scanned value to its source. An invariant to be maintained is that `lo <= hi`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub lo: Position,
    pub hi: Position,
}

impl Span {
    /// Construct a new span. Will panic if `lo > hi`. Prefer this constructor to construct a new
    /// [`Span`] over using direct struct initialization.
    pub const fn new(lo: Position, hi: Position) -> Self {
        assert!(lo.0 <= hi.0, "`lo` must not be larger than `hi`");
        Span { lo, hi }
    }

    pub const fn len(&self) -> usize {
        self.hi.0 - self.lo.0
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_range(self) -> std::ops::Range<usize> {
        self.lo.0..self.hi.0
    }
}

/// A value together with the region of input it was scanned from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub span: Span,
    pub val: T,
}

impl<T> Spanned<T> {
    pub fn new(span: Span, val: T) -> Self {
        Spanned { span, val }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            span: self.span,
            val: f(self.val),
        }
    }
}
