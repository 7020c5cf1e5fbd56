use num::BigInt;
use std::fmt::{Display, Formatter};

/// Value
///
/// [`Value`] is both the syntax tree produced by the parser and the
/// result of evaluation. Compound values exclusively own their children,
/// so a value is always a finite tree.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum Value {
    Atom(String),
    List(Vec<Value>),
    DottedList(Vec<Value>, Box<Value>),
    Number(BigInt),
    String(String),
    Bool(bool),
}

impl Value {
    pub fn new_atom(val: &str) -> Value {
        Value::Atom(val.into())
    }

    pub fn new_string(val: &str) -> Value {
        Value::String(val.into())
    }

    /// New Dotted List
    ///
    /// Construct an improper list such as `(a b . c)`, where `iter`
    /// supplies the leading elements and `tail` the value after the dot.
    pub fn new_dotted_list<T: IntoIterator<Item = Value>>(iter: T, tail: Value) -> Value {
        Value::DottedList(iter.into_iter().collect(), Box::new(tail))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_quote(&self) -> bool {
        self.is_atom_str("quote")
    }

    pub fn is_atom_str(&self, s: &str) -> bool {
        match self.as_atom() {
            Some(name) => name == s,
            _ => false,
        }
    }

    /// Is Self Evaluating
    ///
    /// Strings, numbers and booleans evaluate to themselves.
    pub fn is_self_evaluating(&self) -> bool {
        matches!(self, Value::String(_) | Value::Number(_) | Value::Bool(_))
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Value::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// Type Name
    ///
    /// The name used when reporting a type mismatch.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Atom(_) => "atom",
            Value::List(_) => "list",
            Value::DottedList(_, _) => "dotted list",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Atom(val.into())
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Number(BigInt::from(val))
    }
}

impl From<BigInt> for Value {
    fn from(val: BigInt) -> Self {
        Value::Number(val)
    }
}

impl From<Vec<Value>> for Value {
    fn from(val: Vec<Value>) -> Self {
        Value::List(val)
    }
}

/// Write a space separated sequence of values, propagating the
/// alternate flag to each element.
fn write_seq(f: &mut Formatter<'_>, items: &[Value]) -> std::fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, " ")?;
        }
        if f.alternate() {
            write!(f, "{:#}", item)?;
        } else {
            write!(f, "{}", item)?;
        }
    }
    Ok(())
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Atom(name) => write!(f, "{}", name),
            Value::Number(num) => write!(f, "{}", num),
            Value::Bool(val) => {
                write!(f, "{}", if *val { "#t" } else { "#f" })
            }
            Value::String(val) => match f.alternate() {
                false => write!(f, "\"{}\"", val),
                true => {
                    write!(f, "\"")?;
                    for it in val.chars() {
                        match it {
                            '"' | '\\' => write!(f, "\\{}", it)?,
                            '\t' => write!(f, "\\t")?,
                            '\n' => write!(f, "\\n")?,
                            '\r' => write!(f, "\\r")?,
                            _ if it.is_control() => write!(f, "\\x{:x};", it as u32)?,
                            it => write!(f, "{}", it)?,
                        };
                    }
                    write!(f, "\"")
                }
            },
            Value::List(items) => {
                write!(f, "(")?;
                write_seq(f, items)?;
                write!(f, ")")
            }
            Value::DottedList(items, tail) => {
                write!(f, "(")?;
                write_seq(f, items)?;
                if f.alternate() {
                    write!(f, " . {:#})", tail)
                } else {
                    write!(f, " . {})", tail)
                }
            }
        }
    }
}

#[macro_export]
macro_rules! val {
    ($elt:expr) => {
        Value::from($elt)
    };
}

#[macro_export]
macro_rules! list {
    () => {
        Value::List(vec![])
    };
    ($($elt:expr),+) => {{
        let v = vec![$(Value::from($elt),)+];
        Value::List(v)
    }};
}

#[macro_export]
macro_rules! dotted {
    ($($elt:expr),* ; $tail:expr) => {{
        let v: Vec<Value> = vec![$(Value::from($elt),)*];
        Value::new_dotted_list(v, Value::from($tail))
    }};
}
