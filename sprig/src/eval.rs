use crate::error::Error;
use crate::error::Error::{BadSpecialForm, UnboundFunction};
use crate::primitive;
use crate::value::Value;
use log::{debug, trace};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Mode
///
/// How the evaluator treats a call it cannot make sense of.
///
/// * Lenient - unknown primitives evaluate to `#f` and arguments that
///   are not numbers are coerced to 0.
///
/// * Strict - unknown primitives, non-numeric arguments, primitives
///   applied to fewer than two arguments and malformed quotes are errors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Lenient,
    Strict,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Mode::Lenient),
            "strict" => Ok(Mode::Strict),
            _ => Err(Error::Default(format!(
                "unknown mode {}, expected lenient or strict",
                s
            ))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Lenient => write!(f, "lenient"),
            Mode::Strict => write!(f, "strict"),
        }
    }
}

/// Evaluator
///
/// A tree walking evaluator over [`Value`]. There are no bindings, so
/// the only state is the [`Mode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator {
    mode: Mode,
}

impl Evaluator {
    pub fn new(mode: Mode) -> Evaluator {
        Evaluator { mode }
    }

    /// Eval
    ///
    /// Evaluate `value` and return the result.
    ///
    /// * Strings, numbers and booleans evaluate to themselves.
    /// * `(quote x)` evaluates to x.
    /// * `(name args...)` evaluates every argument from left to right and
    ///   applies the primitive bound to `name`.
    ///
    /// Anything else (a bare atom, `()`, a dotted list or a list headed
    /// by something other than an atom) is a bad special form.
    ///
    /// # Arguments
    /// `value` - The expression to evaluate
    pub fn eval(&self, value: &Value) -> Result<Value, Error> {
        if value.is_self_evaluating() {
            return Ok(value.clone());
        }

        match value {
            Value::List(items) => match items.as_slice() {
                [head, quoted] if head.is_quote() => Ok(quoted.clone()),
                [head, ..] if head.is_quote() && self.mode == Mode::Strict => Err(
                    BadSpecialForm("Malformed quote".into(), value.clone()),
                ),
                [Value::Atom(name), args @ ..] => self.apply(name, args),
                _ => Err(BadSpecialForm(
                    "Unrecognized special form".into(),
                    value.clone(),
                )),
            },
            _ => Err(BadSpecialForm(
                "Unrecognized special form".into(),
                value.clone(),
            )),
        }
    }

    /// Apply
    ///
    /// Evaluate `args` and apply the primitive `name` to the results.
    fn apply(&self, name: &str, args: &[Value]) -> Result<Value, Error> {
        let args = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>, _>>()?;
        trace!("apply {} to {} argument(s)", name, args.len());

        match primitive::lookup(name) {
            Some(op) => primitive::numeric_binop(name, op, &args, self.mode),
            None => match self.mode {
                Mode::Lenient => {
                    debug!("{} is not a primitive, evaluating to #f", name);
                    Ok(Value::Bool(false))
                }
                Mode::Strict => Err(UnboundFunction(
                    "Unrecognized primitive function args".into(),
                    name.into(),
                )),
            },
        }
    }
}
