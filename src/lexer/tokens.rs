use std::fmt::Display;

/// Classification code of a token.
///
/// The set of codes belongs to the consuming grammar; only
/// [`END_OF_STRING`] is reserved.
pub type TokenType = u32;

/// Kind of the sentinel token appended after the last real match.
pub const END_OF_STRING: TokenType = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub value: String,
    /// Character offset (not byte offset) of the match start.
    pub position: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})@{}", self.kind, self.value, self.position)
    }
}

impl Token {
    pub fn new(kind: TokenType, value: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            position,
        }
    }

    pub fn is_a(&self, kind: TokenType) -> bool {
        self.kind == kind
    }

    pub fn is_one_of_many(&self, kinds: &[TokenType]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_end_of_string(&self) -> bool {
        self.kind == END_OF_STRING
    }
}
