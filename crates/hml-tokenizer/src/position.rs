//! Source locations for tokens and nodes.

/// A located range of the source text.
///
/// `line` and `column` are 0-based and describe where the range starts.
/// `offset` and `length` are counted in characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line of the first character (0-based).
    pub line: u32,
    /// Column of the first character (0-based).
    pub column: u32,
    /// Character offset of the first character.
    pub offset: u32,
    /// Number of characters covered.
    pub length: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub fn new(line: u32, column: u32, offset: u32, length: u32) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }

    /// Character offset one past the last covered character.
    #[inline]
    pub fn end(&self) -> u32 {
        self.offset + self.length
    }

    /// Whether this position covers no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Get the source text covered by this position.
    ///
    /// Offsets past the end of `source` are clamped to its length.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        let mut boundaries = source
            .char_indices()
            .map(|(index, _)| index)
            .chain(std::iter::once(source.len()));
        let start = boundaries.nth(self.offset as usize).unwrap_or(source.len());
        let end = match self.length {
            0 => start,
            length => boundaries.nth(length as usize - 1).unwrap_or(source.len()),
        };
        &source[start..end]
    }
}

impl From<Position> for std::ops::Range<usize> {
    fn from(position: Position) -> Self {
        position.offset as usize..position.end() as usize
    }
}
