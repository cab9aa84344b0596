//! modplan-query: Boolean filter expressions
//!
//! Compiles infix expressions such as
//! `name:Data AND (code:CS1231 OR code:CS1010)` into a [`Predicate`] that can
//! be evaluated against modules or degree planner slots.
//!
//! - `tokenize`: logos lexer splitting on `AND`, `OR` and brackets
//! - `compile`: shunting-yard compiler producing a `Predicate`
//! - `filter`: apply a predicate to a collection, preserving order

mod error;
mod lexer;
mod parser;
mod predicate;
mod token;

pub use error::ParseError;
pub use lexer::{tokenize, Span, Token};
pub use parser::Compiler;
pub use predicate::{filter, Field, FieldMatch, PlannedSlot, Predicate, Queryable};
pub use token::TokenKind;

/// Compile a filter expression into a predicate
pub fn compile(expression: &str) -> Result<Predicate, ParseError> {
    let tokens = tokenize(expression);
    let result = Compiler::new(expression, tokens).compile();
    match &result {
        Ok(predicate) => tracing::debug!(expression, %predicate, "compiled filter expression"),
        Err(err) => tracing::debug!(expression, error = %err, "rejected filter expression"),
    }
    result
}
