use std::ops::Range;

/// A half-open range of byte offsets into a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn union_covers_both() {
        assert_eq!(Span::new(7, 8).union(Span::new(9, 12)), Span::new(7, 12));
        assert_eq!(Span::new(9, 12).union(Span::new(7, 8)), Span::new(7, 12));
    }

    #[test]
    fn empty_span() {
        let span = Span::empty(4);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
        assert_eq!(Span::from(2..5).len(), 3);
    }
}
