use crate::parse;
use crate::value::Value;

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum Error {
    #[error("expected {} args; found values {}", .0, .1.iter().map(|it| it.to_string()).collect::<Vec<_>>().join(" "))]
    NumArgs(usize, Vec<Value>),

    #[error("invalid type: expected {0}, found {1}")]
    TypeMismatch(String, Value),

    #[error("parse error at {0}")]
    ParserFailure(#[from] parse::Error),

    #[error("{0}: {1}")]
    BadSpecialForm(String, Value),

    #[error("{0}: {1}")]
    UnboundFunction(String, String),

    #[error("{0}")]
    Default(String),
}
