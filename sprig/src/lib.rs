use crate::error::Error;
use crate::eval::{Evaluator, Mode};
use crate::value::Value;

pub mod error;
pub mod eval;
pub mod lex;
pub mod parcom;
pub mod parse;
pub mod primitive;
pub mod value;

/// Read Expr
///
/// Parse `text`, degrading a parse failure into a string value that
/// describes it rather than an error.
pub fn read_expr(text: &str) -> Value {
    match parse::parse(text) {
        Ok(value) => value,
        Err(e) => Value::String(format!("No match: {}", e)),
    }
}

/// Eval Text
///
/// Parse and evaluate `text`. In strict mode the whole of `text` must be
/// a single expression; in lenient mode anything after the first
/// expression is ignored.
pub fn eval_text(text: &str, mode: Mode) -> Result<Value, Error> {
    let value = match mode {
        Mode::Lenient => parse::parse(text)?,
        Mode::Strict => parse::parse_complete(text)?,
    };
    Evaluator::new(mode).eval(&value)
}

/// Read Eval
///
/// Parse, evaluate and print `text`. In lenient mode a parse failure
/// evaluates to its `No match:` string; errors are printed as
/// `error: <description>`.
pub fn read_eval(text: &str, mode: Mode) -> String {
    let result = match mode {
        Mode::Lenient => Evaluator::new(mode).eval(&read_expr(text)),
        Mode::Strict => eval_text(text, mode),
    };
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format!("error: {}", e),
    }
}
