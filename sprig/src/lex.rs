use crate::parcom::{Parser, map, many1, satisfy};

/// Characters that may appear in an atom alongside letters and digits.
pub const SYMBOL_CHARS: &str = "!#$%&|*+-/:<=>?@^_~";

pub fn is_symbol_char(c: char) -> bool {
    SYMBOL_CHARS.contains(c)
}

pub fn letter<'a>() -> impl Parser<'a, char> {
    satisfy("letter", char::is_alphabetic)
}

pub fn digit<'a>() -> impl Parser<'a, char> {
    satisfy("digit", |c| c.is_ascii_digit())
}

pub fn symbol<'a>() -> impl Parser<'a, char> {
    satisfy("symbol", is_symbol_char)
}

pub fn space<'a>() -> impl Parser<'a, char> {
    satisfy("space", char::is_whitespace)
}

/// One or more whitespace characters.
pub fn whitespace1<'a>() -> impl Parser<'a, ()> {
    map(many1(space()), |_| ())
}

/// Any character not contained in `set`.
pub fn none_of<'a>(set: &'static str) -> impl Parser<'a, char> {
    satisfy(format!("none of {:?}", set), move |c| !set.contains(c))
}
