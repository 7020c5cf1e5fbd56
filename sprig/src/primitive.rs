use crate::error::Error;
use crate::error::Error::{NumArgs, TypeMismatch};
use crate::eval::Mode;
use crate::value::Value;
use ::lazy_static::lazy_static;
use log::{debug, trace};
use num::{BigInt, Integer, Zero};
use std::collections::HashMap;

/// A binary integer operation that is folded across a primitive's
/// arguments.
pub type BinaryOp = fn(&BigInt, &BigInt) -> Result<BigInt, Error>;

lazy_static! {
    static ref PRIMITIVES: HashMap<&'static str, BinaryOp> = HashMap::from([
        ("+", add as BinaryOp),
        ("-", subtract as BinaryOp),
        ("*", multiply as BinaryOp),
        ("/", divide as BinaryOp),
        ("mod", modulo as BinaryOp),
        ("quotient", quotient as BinaryOp),
        ("remainder", remainder as BinaryOp),
    ]);
}

/// Lookup
///
/// Return the operation bound to the primitive `name`, if any.
pub fn lookup(name: &str) -> Option<BinaryOp> {
    PRIMITIVES.get(name).copied()
}

/// The names of every primitive, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names = PRIMITIVES.keys().copied().collect::<Vec<_>>();
    names.sort_unstable();
    names
}

fn add(x: &BigInt, y: &BigInt) -> Result<BigInt, Error> {
    Ok(x + y)
}

fn subtract(x: &BigInt, y: &BigInt) -> Result<BigInt, Error> {
    Ok(x - y)
}

fn multiply(x: &BigInt, y: &BigInt) -> Result<BigInt, Error> {
    Ok(x * y)
}

fn divide(x: &BigInt, y: &BigInt) -> Result<BigInt, Error> {
    nonzero("/", y)?;
    Ok(x / y)
}

fn modulo(x: &BigInt, y: &BigInt) -> Result<BigInt, Error> {
    nonzero("mod", y)?;
    Ok(x.mod_floor(y))
}

fn quotient(x: &BigInt, y: &BigInt) -> Result<BigInt, Error> {
    nonzero("quotient", y)?;
    Ok(x / y)
}

fn remainder(x: &BigInt, y: &BigInt) -> Result<BigInt, Error> {
    nonzero("remainder", y)?;
    Ok(x % y)
}

fn nonzero(name: &str, y: &BigInt) -> Result<(), Error> {
    match y.is_zero() {
        true => Err(Error::Default(format!("{} is undefined for 0", name))),
        false => Ok(()),
    }
}

/// Numeric Binop
///
/// Convert every argument to an integer and left fold `op` across them,
/// starting from the first. At least one argument is required; strict
/// mode requires two.
///
/// # Arguments
/// `name` - the primitive being applied, for tracing
/// `op` - the operation to fold
/// `args` - the evaluated arguments
/// `mode` - whether non-numeric arguments are coerced or rejected
pub fn numeric_binop(
    name: &str,
    op: BinaryOp,
    args: &[Value],
    mode: Mode,
) -> Result<Value, Error> {
    let (first, rest) = args.split_first().ok_or_else(|| NumArgs(2, vec![]))?;
    if rest.is_empty() && mode == Mode::Strict {
        return Err(NumArgs(2, args.to_vec()));
    }

    let mut acc = unpack_num(first, mode)?;
    for arg in rest {
        let y = unpack_num(arg, mode)?;
        trace!("({} {} {})", name, acc, y);
        acc = op(&acc, &y)?;
    }
    Ok(Value::Number(acc))
}

/// Unpack Num
///
/// Coerce a value to an integer. Numbers unpack to themselves, strings
/// are read as integers and a single element list unpacks its element.
///
/// In lenient mode a string without a leading integer, or any other
/// value, unpacks to 0. In strict mode these are a type mismatch, and a
/// string must contain nothing but the integer.
pub fn unpack_num(value: &Value, mode: Mode) -> Result<BigInt, Error> {
    match (value, mode) {
        (Value::Number(num), _) => Ok(num.clone()),
        (Value::String(text), Mode::Lenient) => match read_leading_integer(text) {
            Some(num) => Ok(num),
            None => {
                debug!("{:#} does not begin with an integer, using 0", value);
                Ok(BigInt::zero())
            }
        },
        (Value::String(text), Mode::Strict) => text
            .trim()
            .parse::<BigInt>()
            .map_err(|_| TypeMismatch("number".into(), value.clone())),
        (Value::List(items), _) if items.len() == 1 => unpack_num(&items[0], mode),
        (_, Mode::Lenient) => {
            debug!("{} is a {}, using 0", value, value.type_name());
            Ok(BigInt::zero())
        }
        (_, Mode::Strict) => Err(TypeMismatch("number".into(), value.clone())),
    }
}

/// Read Leading Integer
///
/// Read an optionally negative decimal integer from the start of `text`,
/// after any leading whitespace. Text following the integer is ignored,
/// unless it continues the number as a fraction or an exponent, in which
/// case the text does not begin with an integer at all.
fn read_leading_integer(text: &str) -> Option<BigInt> {
    let text = text.trim_start();
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if len == 0 || continues_number(&unsigned[len..]) {
        return None;
    }

    let sign_len = text.len() - unsigned.len();
    text[..sign_len + len].parse::<BigInt>().ok()
}

/// Whether `rest` begins with a decimal fraction (`.5`) or an exponent
/// (`e5`, `E-5`, `e+5`).
fn continues_number(rest: &str) -> bool {
    let starts_with_digit = |text: &str| text.starts_with(|c: char| c.is_ascii_digit());
    if let Some(fraction) = rest.strip_prefix('.') {
        return starts_with_digit(fraction);
    }
    match rest.strip_prefix(&['e', 'E'][..]) {
        Some(exponent) => {
            starts_with_digit(exponent.strip_prefix(&['+', '-'][..]).unwrap_or(exponent))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    fn num(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn apply(name: &str, args: &[Value], mode: Mode) -> Result<Value, Error> {
        numeric_binop(name, lookup(name).unwrap(), args, mode)
    }

    #[test]
    fn table() {
        assert_eq!(
            names(),
            vec!["*", "+", "-", "/", "mod", "quotient", "remainder"]
        );
        assert!(lookup("+").is_some());
        assert!(lookup("foo").is_none());
        assert!(lookup("modulo").is_none());
    }

    #[test]
    fn folds_left() {
        let args = [Value::from(10), Value::from(3), Value::from(2)];
        assert_eq!(apply("-", &args, Mode::Lenient), Ok(Value::from(5)));
        let args = [Value::from(100), Value::from(5), Value::from(2)];
        assert_eq!(apply("/", &args, Mode::Lenient), Ok(Value::from(10)));
    }

    #[test]
    fn division_truncates() {
        assert_eq!(divide(&num(7), &num(2)), Ok(num(3)));
        assert_eq!(divide(&num(-7), &num(2)), Ok(num(-3)));
        assert_eq!(quotient(&num(-7), &num(2)), Ok(num(-3)));
        assert_eq!(remainder(&num(-7), &num(2)), Ok(num(-1)));
        assert_eq!(remainder(&num(7), &num(-2)), Ok(num(1)));
        assert_eq!(modulo(&num(-7), &num(2)), Ok(num(1)));
        assert_eq!(modulo(&num(7), &num(-2)), Ok(num(-1)));
    }

    #[test]
    fn division_by_zero() {
        for name in ["/", "mod", "quotient", "remainder"] {
            assert_eq!(
                apply(name, &[Value::from(1), Value::from(0)], Mode::Lenient),
                Err(Error::Default(format!("{} is undefined for 0", name)))
            );
        }
    }

    #[test]
    fn arity() {
        assert_eq!(apply("+", &[], Mode::Lenient), Err(NumArgs(2, vec![])));
        assert_eq!(apply("+", &[], Mode::Strict), Err(NumArgs(2, vec![])));
        assert_eq!(apply("-", &[Value::from(4)], Mode::Lenient), Ok(Value::from(4)));
        assert_eq!(
            apply("-", &[Value::from(4)], Mode::Strict),
            Err(NumArgs(2, vec![Value::from(4)]))
        );
    }

    #[test]
    fn lenient_unpacking() {
        let unpack = |value: Value| unpack_num(&value, Mode::Lenient);
        assert_eq!(unpack(Value::from(7)), Ok(num(7)));
        assert_eq!(unpack(Value::new_string("5")), Ok(num(5)));
        assert_eq!(unpack(Value::new_string("  12abc")), Ok(num(12)));
        assert_eq!(unpack(Value::new_string("-3")), Ok(num(-3)));
        assert_eq!(unpack(Value::new_string("abc")), Ok(num(0)));
        assert_eq!(unpack(Value::new_string("")), Ok(num(0)));
        assert_eq!(unpack(Value::new_string("1.5")), Ok(num(0)));
        assert_eq!(unpack(Value::new_string("1.")), Ok(num(1)));
        assert_eq!(unpack(Value::new_string("1e5")), Ok(num(0)));
        assert_eq!(unpack(Value::new_string("1E-5")), Ok(num(0)));
        assert_eq!(unpack(Value::new_string("-2e+3 apples")), Ok(num(0)));
        assert_eq!(unpack(Value::new_string("1e")), Ok(num(1)));
        assert_eq!(unpack(Value::new_string("3eggs")), Ok(num(3)));
        assert_eq!(unpack(list![9]), Ok(num(9)));
        assert_eq!(unpack(list![list![Value::new_string("4")]]), Ok(num(4)));
        assert_eq!(unpack(list![1, 2]), Ok(num(0)));
        assert_eq!(unpack(Value::from(true)), Ok(num(0)));
        assert_eq!(unpack(Value::new_atom("x")), Ok(num(0)));
    }

    #[test]
    fn strict_unpacking() {
        let unpack = |value: Value| unpack_num(&value, Mode::Strict);
        assert_eq!(unpack(Value::from(7)), Ok(num(7)));
        assert_eq!(unpack(Value::new_string(" 5 ")), Ok(num(5)));
        assert_eq!(unpack(list![9]), Ok(num(9)));
        assert_eq!(
            unpack(Value::new_string("12abc")),
            Err(TypeMismatch("number".into(), Value::new_string("12abc")))
        );
        assert_eq!(
            unpack(Value::from(false)),
            Err(TypeMismatch("number".into(), Value::from(false)))
        );
        assert_eq!(
            unpack(list![1, 2]),
            Err(TypeMismatch("number".into(), list![1, 2]))
        );
    }

    #[test]
    fn big_integers() {
        let big = "92233720368547758070000".parse::<BigInt>().unwrap();
        assert_eq!(
            apply("*", &[Value::from(big.clone()), Value::from(10)], Mode::Lenient),
            Ok(Value::from(big * 10u32))
        );
    }
}
