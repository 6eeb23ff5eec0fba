/// Forward-only position in a byte buffer. Every read is bounds-checked and
/// yields `None` past the end.
#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn current(&self) -> Option<u8> {
        self.at(0)
    }

    pub fn peek(&self) -> Option<u8> {
        self.at(1)
    }

    pub fn peek2(&self) -> Option<u8> {
        self.at(2)
    }

    pub fn is_at(&self, byte: u8) -> bool {
        self.current() == Some(byte)
    }

    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    pub fn advance_by(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.bytes.len());
    }

    /// Returns the current byte and moves past it.
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.current()?;
        self.advance();
        Some(byte)
    }

    fn at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos.checked_add(offset)?).copied()
    }
}
