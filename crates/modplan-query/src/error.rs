use crate::lexer::Span;
use thiserror::Error;

/// Reasons a filter expression fails to compile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unbalanced bracket")]
    UnbalancedBracket { span: Span },

    #[error("consecutive left brackets without an operand between them")]
    ConsecutiveLeftBrackets { span: Span },

    #[error("operator or bracket is missing an operand")]
    MissingOperand { span: Span },

    #[error("operand is not joined to the expression by AND or OR")]
    TrailingOperand { span: Span },

    #[error("unknown field '{field}': expected name, code or credits")]
    UnknownField { field: String, span: Span },

    #[error("empty keyword for field '{field}'")]
    EmptyKeyword { field: String, span: Span },

    #[error("credits keyword '{keyword}' is not a whole number")]
    InvalidCredits { keyword: String, span: Span },

    #[error("unexpected input '{text}'")]
    UnexpectedToken { text: String, span: Span },
}

impl ParseError {
    /// Stable identifier for display
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnbalancedBracket { .. } => "E-QRY-001",
            ParseError::ConsecutiveLeftBrackets { .. } => "E-QRY-002",
            ParseError::MissingOperand { .. } => "E-QRY-003",
            ParseError::TrailingOperand { .. } => "E-QRY-004",
            ParseError::UnknownField { .. } => "E-QRY-005",
            ParseError::EmptyKeyword { .. } => "E-QRY-006",
            ParseError::InvalidCredits { .. } => "E-QRY-007",
            ParseError::UnexpectedToken { .. } => "E-QRY-008",
        }
    }

    /// Location of the offending input in the expression
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnbalancedBracket { span }
            | ParseError::ConsecutiveLeftBrackets { span }
            | ParseError::MissingOperand { span }
            | ParseError::TrailingOperand { span }
            | ParseError::UnknownField { span, .. }
            | ParseError::EmptyKeyword { span, .. }
            | ParseError::InvalidCredits { span, .. }
            | ParseError::UnexpectedToken { span, .. } => *span,
        }
    }
}
