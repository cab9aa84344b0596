//! Shunting-yard compiler for filter expressions
//!
//! Grammar:
//!
//! ```text
//! expr    := operand | expr AND expr | expr OR expr | '(' expr ')'
//! operand := field ':' keyword-phrase        field ∈ {name, code, credits}
//! ```
//!
//! `AND` binds tighter than `OR`; both are left-associative. Operands are
//! compiled to predicates as soon as they are read, so the operand stack holds
//! predicates and applying an operator composes the two on top.

use crate::error::ParseError;
use crate::lexer::{Span, Token};
use crate::predicate::{Field, Predicate};
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
    LeftBracket,
}

impl Operator {
    fn precedence(self) -> u8 {
        match self {
            Operator::And => 2,
            Operator::Or => 1,
            Operator::LeftBracket => 0,
        }
    }
}

/// Compiler state: the token stream plus the two shunting-yard stacks
pub struct Compiler<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    operands: Vec<(Predicate, Span)>,
    operators: Vec<(Operator, Span)>,
}

impl<'s> Compiler<'s> {
    pub fn new(source: &'s str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            operands: Vec::new(),
            operators: Vec::new(),
        }
    }

    pub fn compile(mut self) -> Result<Predicate, ParseError> {
        let mut previous: Option<TokenKind> = None;

        while let Some(token) = self.tokens.get(self.pos).cloned() {
            // An operand or '(' may not follow a complete operand
            if matches!(token.kind, TokenKind::Word | TokenKind::LParen) && ends_operand(previous) {
                return Err(ParseError::TrailingOperand { span: token.span });
            }
            // An operator or ')' needs a complete operand on its left
            if (token.kind.is_operator() && !ends_operand(previous))
                || (token.kind == TokenKind::RParen && previous.is_some_and(|kind| kind.is_operator()))
            {
                return Err(ParseError::MissingOperand { span: token.span });
            }

            match token.kind {
                TokenKind::Word => {
                    self.push_operand(token.span)?;
                    previous = Some(TokenKind::Word);
                    continue;
                }
                TokenKind::LParen => {
                    if previous == Some(TokenKind::LParen) {
                        return Err(ParseError::ConsecutiveLeftBrackets { span: token.span });
                    }
                    self.operators.push((Operator::LeftBracket, token.span));
                }
                TokenKind::RParen => {
                    if previous == Some(TokenKind::LParen) {
                        return Err(ParseError::MissingOperand { span: token.span });
                    }
                    self.close_bracket(token.span)?;
                }
                TokenKind::And => self.push_operator(Operator::And, token.span)?,
                TokenKind::Or => self.push_operator(Operator::Or, token.span)?,
                TokenKind::Error => {
                    return Err(ParseError::UnexpectedToken {
                        text: token.text(self.source).to_string(),
                        span: token.span,
                    });
                }
                TokenKind::Eof => break,
            }
            previous = Some(token.kind);
            self.pos += 1;
        }

        while let Some((operator, span)) = self.operators.pop() {
            if operator == Operator::LeftBracket {
                return Err(ParseError::UnbalancedBracket { span });
            }
            self.apply(operator, span)?;
        }

        let mut operands = self.operands.into_iter();
        match (operands.next(), operands.next()) {
            (Some((predicate, _)), None) => Ok(predicate),
            (None, _) => Err(ParseError::MissingOperand {
                span: Span::new(0, self.source.len()),
            }),
            (Some(_), Some((_, span))) => Err(ParseError::TrailingOperand { span }),
        }
    }

    /// Join the run of words starting at `first` into one operand and compile it
    fn push_operand(&mut self, first: Span) -> Result<(), ParseError> {
        let mut span = first;
        self.pos += 1;
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind != TokenKind::Word {
                break;
            }
            span = span.merge(token.span);
            self.pos += 1;
        }

        let predicate = compile_operand(&self.source[span.start..span.end], span)?;
        self.operands.push((predicate, span));
        Ok(())
    }

    fn push_operator(&mut self, incoming: Operator, span: Span) -> Result<(), ParseError> {
        while let Some(&(top, top_span)) = self.operators.last() {
            if top == Operator::LeftBracket || top.precedence() < incoming.precedence() {
                break;
            }
            self.operators.pop();
            self.apply(top, top_span)?;
        }
        self.operators.push((incoming, span));
        Ok(())
    }

    fn close_bracket(&mut self, span: Span) -> Result<(), ParseError> {
        loop {
            match self.operators.pop() {
                Some((Operator::LeftBracket, _)) => return Ok(()),
                Some((operator, operator_span)) => self.apply(operator, operator_span)?,
                None => return Err(ParseError::UnbalancedBracket { span }),
            }
        }
    }

    /// Pop two predicates and push their composition
    fn apply(&mut self, operator: Operator, span: Span) -> Result<(), ParseError> {
        if self.operands.len() < 2 {
            return Err(ParseError::MissingOperand { span });
        }
        let (right, right_span) = self
            .operands
            .pop()
            .ok_or(ParseError::MissingOperand { span })?;
        let (left, left_span) = self
            .operands
            .pop()
            .ok_or(ParseError::MissingOperand { span })?;

        let composed = match operator {
            Operator::And => left.and(right),
            Operator::Or => left.or(right),
            Operator::LeftBracket => return Err(ParseError::UnbalancedBracket { span }),
        };
        self.operands.push((composed, left_span.merge(right_span)));
        Ok(())
    }
}

/// Whether the token before the current one closes an operand
fn ends_operand(previous: Option<TokenKind>) -> bool {
    matches!(previous, Some(TokenKind::Word | TokenKind::RParen))
}

/// Compile one `field:keyword` operand
fn compile_operand(text: &str, span: Span) -> Result<Predicate, ParseError> {
    let Some((prefix, keyword)) = text.split_once(':') else {
        return Err(ParseError::UnknownField {
            field: text.trim().to_string(),
            span,
        });
    };

    let field = Field::parse(prefix).ok_or_else(|| ParseError::UnknownField {
        field: prefix.trim().to_string(),
        span,
    })?;

    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(ParseError::EmptyKeyword {
            field: field.to_string(),
            span,
        });
    }
    if field == Field::Credits && !keyword.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidCredits {
            keyword: keyword.to_string(),
            span,
        });
    }

    Ok(Predicate::field(field, keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    fn name(keyword: &str) -> Predicate {
        Predicate::field(Field::Name, keyword)
    }

    fn code(keyword: &str) -> Predicate {
        Predicate::field(Field::Code, keyword)
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(compile("name:Data").unwrap(), name("Data"));
    }

    #[test]
    fn test_multi_word_operand_keeps_spacing() {
        assert_eq!(
            compile("name:Data  Structures").unwrap(),
            name("Data  Structures")
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let predicate = compile("code:A OR code:B AND code:C").unwrap();
        assert_eq!(predicate, code("A").or(code("B").and(code("C"))));
    }

    #[test]
    fn test_left_associative() {
        let predicate = compile("code:A OR code:B OR code:C").unwrap();
        assert_eq!(predicate, code("A").or(code("B")).or(code("C")));

        let predicate = compile("code:A AND code:B AND code:C").unwrap();
        assert_eq!(predicate, code("A").and(code("B")).and(code("C")));
    }

    #[test]
    fn test_brackets_override_precedence() {
        let predicate = compile("(code:A OR code:B) AND code:C").unwrap();
        assert_eq!(predicate, code("A").or(code("B")).and(code("C")));
    }

    #[test]
    fn test_field_prefix_is_case_insensitive() {
        assert_eq!(compile("NAME:data").unwrap(), name("data"));
        assert_eq!(
            compile("credits: 4").unwrap(),
            Predicate::field(Field::Credits, "4")
        );
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert!(matches!(
            compile("(name:a"),
            Err(ParseError::UnbalancedBracket { span }) if span == Span::new(0, 1)
        ));
        assert!(matches!(
            compile("name:a)"),
            Err(ParseError::UnbalancedBracket { .. })
        ));
    }

    #[test]
    fn test_consecutive_left_brackets() {
        assert!(matches!(
            compile("((name:a))"),
            Err(ParseError::ConsecutiveLeftBrackets { span }) if span == Span::new(1, 2)
        ));
    }

    #[test]
    fn test_missing_operands() {
        assert!(matches!(compile(""), Err(ParseError::MissingOperand { .. })));
        assert!(matches!(
            compile("name:a AND"),
            Err(ParseError::MissingOperand { .. })
        ));
        assert!(matches!(
            compile("OR name:a"),
            Err(ParseError::MissingOperand { .. })
        ));
        assert!(matches!(
            compile("name:a AND ()"),
            Err(ParseError::MissingOperand { .. })
        ));
        assert!(matches!(
            compile("AND (code:A) (code:B)"),
            Err(ParseError::MissingOperand { span }) if span == Span::new(0, 3)
        ));
        assert!(matches!(
            compile("code:A OR AND code:B"),
            Err(ParseError::MissingOperand { span }) if span == Span::new(10, 13)
        ));
        assert!(matches!(
            compile("(OR code:A)"),
            Err(ParseError::MissingOperand { span }) if span == Span::new(1, 3)
        ));
        assert!(matches!(
            compile("(code:A AND)"),
            Err(ParseError::MissingOperand { span }) if span == Span::new(11, 12)
        ));
    }

    #[test]
    fn test_trailing_operand() {
        let source = "name:a (code:b)";
        match compile(source) {
            Err(ParseError::TrailingOperand { span }) => {
                assert_eq!(&source[span.start..span.end], "(");
            }
            other => panic!("expected trailing operand, got {:?}", other),
        }

        // Operator after both operands
        let source = "(code:A) (code:B) OR";
        match compile(source) {
            Err(ParseError::TrailingOperand { span }) => assert_eq!(span, Span::new(9, 10)),
            other => panic!("expected trailing operand, got {:?}", other),
        }

        assert!(matches!(
            compile("(code:A) code:B"),
            Err(ParseError::TrailingOperand { span }) if span == Span::new(9, 15)
        ));
    }

    #[test]
    fn test_operand_errors() {
        assert!(matches!(
            compile("tag:core"),
            Err(ParseError::UnknownField { field, .. }) if field == "tag"
        ));
        assert!(matches!(
            compile("Data Structures"),
            Err(ParseError::UnknownField { .. })
        ));
        assert!(matches!(
            compile("name:   "),
            Err(ParseError::EmptyKeyword { field, .. }) if field == "name"
        ));
        assert!(matches!(
            compile("credits:four"),
            Err(ParseError::InvalidCredits { keyword, .. }) if keyword == "four"
        ));
    }
}
