/// Half-open byte range `[start, end)` into a source buffer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Span covering `len` bytes from `start`, clamped to `limit`.
    pub(crate) fn clamped(start: usize, len: usize, limit: usize) -> Self {
        let start = start.min(limit);
        Self {
            start,
            end: start.saturating_add(len).min(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
