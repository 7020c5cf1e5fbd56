use crate::lex::{digit, letter, none_of, symbol, whitespace1};
use crate::parcom::{
    Failure, Input, ParseResult, Parser, between, ch, eof, many, many1, map, nested, or, pair,
    preceded, sep_by, terminated,
};
use crate::value::Value;
use crate::{list, one_of};
use log::debug;
use num::BigInt;
use std::cell::RefCell;

/// The deepest an expression may be nested, counting both lists and
/// quotes. Input nested any deeper is rejected rather than exhausting
/// the stack.
pub const MAX_DEPTH: usize = 256;

#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The input ended before an expression was complete
    #[error("{0}")]
    Incomplete(Failure),
    #[error("{0}")]
    NoMatch(Failure),
}

impl Error {
    pub fn failure(&self) -> &Failure {
        match self {
            Error::Incomplete(failure) | Error::NoMatch(failure) => failure,
        }
    }

    fn from_failure(failure: Failure) -> Error {
        match failure.is_eof() {
            true => Error::Incomplete(failure),
            false => Error::NoMatch(failure),
        }
    }
}

/// Parse
///
/// Parse the first expression in `text`. Any text following the
/// expression is ignored.
///
/// # Examples
///
/// ```
///     use sprig::parse::parse;
///     use sprig::value::Value;
///     let value = parse("'(1 2 3)").unwrap();
///     assert!(matches!(value, Value::List(_)));
/// ```
pub fn parse(text: &str) -> Result<Value, Error> {
    let furthest = RefCell::new(None);
    let result = expression(Input::new(text, &furthest)).map(|(_, value)| value);
    finish(result, furthest)
}

/// Parse Complete
///
/// Parse exactly one expression, failing if any text follows it.
pub fn parse_complete(text: &str) -> Result<Value, Error> {
    let furthest = RefCell::new(None);
    let result = terminated(expression, eof)
        .apply(Input::new(text, &furthest))
        .map(|(_, value)| value);
    finish(result, furthest)
}

fn finish(
    result: Result<Value, Failure>,
    furthest: RefCell<Option<Failure>>,
) -> Result<Value, Error> {
    result.map_err(|failure| {
        let failure = match furthest.into_inner() {
            Some(furthest) => furthest.merge(failure),
            None => failure,
        };
        debug!("parse failed at offset {}: {}", failure.offset, failure);
        Error::from_failure(failure)
    })
}

/// Expression
///
/// The alternatives are tried in order and the first to match wins.
pub fn expression(input: Input<'_>) -> ParseResult<'_, Value> {
    nested(MAX_DEPTH, one_of!(atom, string, number, quoted, parenthesized)).apply(input)
}

/// Atom
///
/// A letter or symbol character followed by any number of letters,
/// digits and symbol characters. `#t`, `#f` and a lone tab are
/// boolean literals rather than atoms.
fn atom(input: Input<'_>) -> ParseResult<'_, Value> {
    let first = or(letter(), symbol());
    let rest = many(one_of!(letter(), digit(), symbol()));
    map(pair(first, rest), |(first, rest)| {
        let text = std::iter::once(first).chain(rest).collect::<String>();
        match text.as_str() {
            "\t" | "#t" => Value::Bool(true),
            "#f" => Value::Bool(false),
            _ => Value::Atom(text),
        }
    })
    .apply(input)
}

/// String
///
/// Everything between a pair of double quotes. There are no escapes.
fn string(input: Input<'_>) -> ParseResult<'_, Value> {
    map(between(ch('"'), many(none_of("\"")), ch('"')), |chars| {
        Value::String(chars.into_iter().collect())
    })
    .apply(input)
}

fn number(input: Input<'_>) -> ParseResult<'_, Value> {
    let (rest, digits) = many1(digit()).apply(input)?;
    match digits.into_iter().collect::<String>().parse::<BigInt>() {
        Ok(num) => Ok((rest, Value::Number(num))),
        Err(_) => Err(input.fail("digit")),
    }
}

/// Quoted
///
/// `'x` is shorthand for `(quote x)`.
fn quoted(input: Input<'_>) -> ParseResult<'_, Value> {
    map(preceded(ch('\''), expression), |value| list!["quote", value]).apply(input)
}

/// Parenthesized
///
/// A list, or a dotted list when the elements are followed by a dot and
/// a tail. The elements are parsed once and the dotted tail is tried
/// before falling back to a plain list.
fn parenthesized(input: Input<'_>) -> ParseResult<'_, Value> {
    let (rest, _) = ch('(').apply(input)?;
    let (rest, items) = sep_by(expression, whitespace1()).apply(rest)?;
    let (rest, value) = match dotted_tail(rest, !items.is_empty()) {
        Ok((rest, tail)) => (rest, Value::new_dotted_list(items, tail)),
        Err(_) => (rest, Value::List(items)),
    };
    let (rest, _) = ch(')').apply(rest)?;
    Ok((rest, value))
}

/// Dotted Tail
///
/// The `. tail` ending a dotted list. The dot must be separated from any
/// preceding element, and from the tail, by whitespace.
fn dotted_tail(input: Input<'_>, separated: bool) -> ParseResult<'_, Value> {
    let input = match separated {
        true => whitespace1().apply(input)?.0,
        false => input,
    };
    preceded(pair(ch('.'), whitespace1()), expression).apply(input)
}

/// Parse Macro
///
/// Parse a single expression, panicking if it is malformed. Intended
/// for tests and examples.
#[macro_export]
macro_rules! parse {
    ($lhs:expr) => {{ $crate::parse::parse($lhs).expect("parse failed") }};
}
