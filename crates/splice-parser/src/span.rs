//! Byte ranges into template source text.

use std::ops::Range;

/// A half-open byte range `start..end` into the template source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Creates a one-byte span at `offset`.
    pub fn at(offset: usize) -> Self {
        Self::new(offset..offset + 1)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the span as a range, for slicing the source.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the smallest span covering both spans.
    pub fn union(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start)..self.end.max(other.end))
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(3..7);
        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 7);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert_eq!(&"0123456789"[span.range()], "3456");
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let span = Span::new(5..2);
        assert!(span.is_empty());
        assert_eq!(span.start(), 5);
    }

    #[test]
    fn test_at_and_union() {
        assert_eq!(Span::at(4), Span::new(4..5));
        assert_eq!(Span::new(2..4).union(Span::new(8..9)), Span::new(2..9));
    }
}
