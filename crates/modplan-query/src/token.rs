use logos::Logos;

/// Token kinds of the filter expression language
///
/// Operators are upper-case so that lower-case "and"/"or" inside a module
/// name stay part of the operand.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    #[token("AND")]
    And,

    #[token("OR")]
    Or,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    /// Any run of non-space, non-bracket characters
    #[regex(r"[^()\s]+")]
    Word,

    // Special
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_operator(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    pub fn is_bracket(&self) -> bool {
        matches!(self, TokenKind::LParen | TokenKind::RParen)
    }
}
