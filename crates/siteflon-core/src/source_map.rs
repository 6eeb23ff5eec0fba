use crate::span::Span;

/// Zero-based line and byte column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Maps byte offsets of one source buffer to line/column positions.
#[derive(Clone, Debug)]
pub struct SourceMap {
    len: usize,
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &[u8]) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .iter()
                    .enumerate()
                    .filter(|(_, byte)| **byte == b'\n')
                    .map(|(idx, _)| idx + 1),
            )
            .collect();
        Self {
            len: source.len(),
            line_starts,
        }
    }

    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        // line_starts always holds 0, so the partition point is at least 1.
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        Position {
            line,
            character: offset - self.line_starts[line],
        }
    }

    pub fn range(&self, span: Span) -> Range {
        Range {
            start: self.position(span.start),
            end: self.position(span.end),
        }
    }
}
