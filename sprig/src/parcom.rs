use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Input
///
/// [`Input`] is a cursor into the text being parsed. It is cheap to
/// copy, which is what makes backtracking possible: an alternative that
/// fails simply discards its copy and the next alternative starts again
/// from the choice point.
///
/// Every failure created through [`Input::fail`] is also recorded in a
/// tracker shared by all copies of the cursor, so that the failure that
/// got furthest into the text can be reported once the whole parse has
/// been abandoned.
///
/// The cursor carries its line and column along with it, and the number
/// of [`nested`] levels it is inside.
#[derive(Clone, Copy, Debug)]
pub struct Input<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    depth: usize,
    furthest: &'a RefCell<Option<Failure>>,
}

impl<'a> Input<'a> {
    pub fn new(text: &'a str, furthest: &'a RefCell<Option<Failure>>) -> Input<'a> {
        Input {
            text,
            offset: 0,
            line: 1,
            column: 1,
            depth: 0,
            furthest,
        }
    }

    /// The text that has not been consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// Advance
    ///
    /// Return a cursor positioned after `c`, which must be the character
    /// returned by [`Input::peek`].
    pub fn advance(&self, c: char) -> Input<'a> {
        let (line, column) = match c {
            '\n' => (self.line + 1, 1),
            _ => (self.line, self.column + 1),
        };
        Input {
            offset: self.offset + c.len_utf8(),
            line,
            column,
            ..*self
        }
    }

    /// Position
    ///
    /// Return the 1-based (line, column) of the cursor.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Fail
    ///
    /// Create a failure at the cursor, recording it in the shared
    /// furthest-failure tracker.
    pub fn fail(&self, expected: &str) -> Failure {
        let failure = Failure {
            offset: self.offset,
            line: self.line,
            column: self.column,
            found: self.peek(),
            expected: vec![expected.to_string()],
        };
        let mut furthest = self.furthest.borrow_mut();
        *furthest = Some(match furthest.take() {
            Some(prev) => prev.merge(failure.clone()),
            None => failure.clone(),
        });
        failure
    }
}

/// Failure
///
/// The description of a mismatch: where it happened, what character was
/// found there (`None` at end of input), and what would have been accepted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub found: Option<char>,
    pub expected: Vec<String>,
}

impl Failure {
    /// Merge
    ///
    /// The failure furthest into the input wins. Failures at the same
    /// offset combine their expectations.
    pub fn merge(self, other: Failure) -> Failure {
        match self.offset.cmp(&other.offset) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => {
                let mut merged = self;
                for expected in other.expected {
                    if !merged.expected.contains(&expected) {
                        merged.expected.push(expected);
                    }
                }
                merged
            }
        }
    }

    pub fn is_eof(&self) -> bool {
        self.found.is_none()
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}: unexpected ", self.line, self.column)?;
        match self.found {
            Some(c) => write!(f, "{:?}", c)?,
            None => write!(f, "end of input")?,
        }
        if let Some((last, init)) = self.expected.split_last() {
            write!(f, ", expecting ")?;
            if !init.is_empty() {
                write!(f, "{} or ", init.join(", "))?;
            }
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}

pub type ParseResult<'a, O> = Result<(Input<'a>, O), Failure>;

pub trait Parser<'a, O> {
    fn apply(&self, input: Input<'a>) -> ParseResult<'a, O>;
}

impl<'a, F, O> Parser<'a, O> for F
where
    F: Fn(Input<'a>) -> ParseResult<'a, O>,
{
    fn apply(&self, input: Input<'a>) -> ParseResult<'a, O> {
        self(input)
    }
}

pub fn eof(input: Input<'_>) -> ParseResult<'_, ()> {
    match input.is_eof() {
        true => Ok((input, ())),
        false => Err(input.fail("end of input")),
    }
}

/// Satisfy
///
/// Accept one character for which `f` holds. On mismatch the failure
/// reports `expected` as what was wanted.
pub fn satisfy<'a, F>(expected: impl Into<String>, f: F) -> impl Parser<'a, char>
where
    F: Fn(char) -> bool,
{
    let expected = expected.into();
    move |input: Input<'a>| match input.peek() {
        Some(c) if f(c) => Ok((input.advance(c), c)),
        _ => Err(input.fail(&expected)),
    }
}

pub fn ch<'a>(expected: char) -> impl Parser<'a, char> {
    satisfy(format!("{:?}", expected), move |c| c == expected)
}

pub fn map<'a, P, F, A, B>(parser: P, f: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    F: Fn(A) -> B,
{
    move |input: Input<'a>| parser.apply(input).map(|(rest, output)| (rest, f(output)))
}

pub fn pair<'a, A, B, OA, OB>(first: A, second: B) -> impl Parser<'a, (OA, OB)>
where
    A: Parser<'a, OA>,
    B: Parser<'a, OB>,
{
    move |input: Input<'a>| {
        let (rest, a) = first.apply(input)?;
        let (rest, b) = second.apply(rest)?;
        Ok((rest, (a, b)))
    }
}

/// Apply `prefix` then `parser`, keeping only the output of `parser`.
pub fn preceded<'a, A, B, OA, OB>(prefix: A, parser: B) -> impl Parser<'a, OB>
where
    A: Parser<'a, OA>,
    B: Parser<'a, OB>,
{
    map(pair(prefix, parser), |(_, output)| output)
}

/// Apply `parser` then `suffix`, keeping only the output of `parser`.
pub fn terminated<'a, A, B, OA, OB>(parser: A, suffix: B) -> impl Parser<'a, OA>
where
    A: Parser<'a, OA>,
    B: Parser<'a, OB>,
{
    map(pair(parser, suffix), |(output, _)| output)
}

pub fn between<'a, A, B, C, OA, OB, OC>(prefix: A, parser: B, suffix: C) -> impl Parser<'a, OB>
where
    A: Parser<'a, OA>,
    B: Parser<'a, OB>,
    C: Parser<'a, OC>,
{
    preceded(prefix, terminated(parser, suffix))
}

/// Or
///
/// Ordered choice: `second` is only tried if `first` fails, and it
/// starts from the same position `first` did.
pub fn or<'a, A, B, O>(first: A, second: B) -> impl Parser<'a, O>
where
    A: Parser<'a, O>,
    B: Parser<'a, O>,
{
    move |input: Input<'a>| match first.apply(input) {
        Ok(output) => Ok(output),
        Err(first_failure) => second
            .apply(input)
            .map_err(|second_failure| first_failure.merge(second_failure)),
    }
}

#[macro_export]
macro_rules! one_of {
    ($parser:expr) => {
        $parser
    };
    ($parser:expr, $($rest:expr),+) => {
        $crate::parcom::or($parser, $crate::one_of!($($rest),+))
    };
}

/// Many
///
/// Apply `parser` zero or more times, stopping at the first failure.
pub fn many<'a, P, O>(parser: P) -> impl Parser<'a, Vec<O>>
where
    P: Parser<'a, O>,
{
    move |input: Input<'a>| {
        let mut outputs = Vec::new();
        let mut rest = input;
        while let Ok((next, output)) = parser.apply(rest) {
            // a parser that succeeds without consuming would never stop
            if next.offset() == rest.offset() {
                break;
            }
            outputs.push(output);
            rest = next;
        }
        Ok((rest, outputs))
    }
}

pub fn many1<'a, P, O>(parser: P) -> impl Parser<'a, Vec<O>>
where
    P: Parser<'a, O>,
{
    move |input: Input<'a>| {
        let (mut rest, first) = parser.apply(input)?;
        let mut outputs = vec![first];
        while let Ok((next, output)) = parser.apply(rest) {
            if next.offset() == rest.offset() {
                break;
            }
            outputs.push(output);
            rest = next;
        }
        Ok((rest, outputs))
    }
}

/// Sep By
///
/// Zero or more `parser`s separated by `separator`. A separator that is
/// not followed by another `parser` is left unconsumed.
pub fn sep_by<'a, P, S, O, OS>(parser: P, separator: S) -> impl Parser<'a, Vec<O>>
where
    P: Parser<'a, O>,
    S: Parser<'a, OS>,
{
    move |input: Input<'a>| {
        let (mut rest, first) = match parser.apply(input) {
            Ok(output) => output,
            Err(_) => return Ok((input, vec![])),
        };
        let mut outputs = vec![first];
        while let Ok((next, _)) = separator.apply(rest) {
            match parser.apply(next) {
                Ok((next, output)) => {
                    outputs.push(output);
                    rest = next;
                }
                Err(_) => break,
            }
        }
        Ok((rest, outputs))
    }
}

/// Nested
///
/// Apply `parser` one level deeper. Once `limit` levels are already open
/// the parser is not applied and the input is rejected instead, which
/// bounds the recursion of self-referential grammars.
pub fn nested<'a, P, O>(limit: usize, parser: P) -> impl Parser<'a, O>
where
    P: Parser<'a, O>,
{
    move |input: Input<'a>| {
        if input.depth >= limit {
            return Err(input.fail(&format!("at most {} levels of nesting", limit)));
        }
        let inner = Input {
            depth: input.depth + 1,
            ..input
        };
        let (rest, output) = parser.apply(inner)?;
        Ok((
            Input {
                depth: input.depth,
                ..rest
            },
            output,
        ))
    }
}
