//! Render query parse errors against the expression
//!
//! ```text
//! Error: [E-QRY-005] unknown field 'title': expected name, code or credits
//!    ╭─[query:1:1]
//!  1 │ title:Data
//! ```

use ariadne::{Label, Report, ReportKind, Source};
use modplan_query::ParseError;

const SOURCE_ID: &str = "query";

/// Write a report for `error` into a string, without colours
pub fn render_parse_error(expression: &str, error: &ParseError) -> String {
    let span = error.span();
    // Zero-width spans at end of input still point at the last column
    let len = expression.len();
    let start = span.start.min(len.saturating_sub(1));
    let end = span.end.clamp(start + 1, len.max(start + 1));

    let report = Report::build(ReportKind::Error, SOURCE_ID, start)
        .with_code(error.code())
        .with_message(error.to_string())
        .with_label(Label::new((SOURCE_ID, start..end)).with_message(label_for(error)))
        .with_config(ariadne::Config::default().with_color(false))
        .finish();

    let mut buffer = Vec::new();
    if report
        .write((SOURCE_ID, Source::from(expression.to_string())), &mut buffer)
        .is_err()
    {
        return format!("[{}] {}", error.code(), error);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn label_for(error: &ParseError) -> &'static str {
    match error {
        ParseError::UnbalancedBracket { .. } => "this bracket has no partner",
        ParseError::ConsecutiveLeftBrackets { .. } => "second bracket opened here",
        ParseError::MissingOperand { .. } => "needs an operand",
        ParseError::TrailingOperand { .. } => "join this with AND or OR",
        ParseError::UnknownField { .. } => "unknown field",
        ParseError::EmptyKeyword { .. } => "keyword missing after ':'",
        ParseError::InvalidCredits { .. } => "expected digits",
        ParseError::UnexpectedToken { .. } => "unexpected",
    }
}
