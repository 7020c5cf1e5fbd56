#[macro_use]
mod common;
use sprig::error::Error::{
    BadSpecialForm, NumArgs, ParserFailure, TypeMismatch, UnboundFunction,
};
use sprig::eval::{Evaluator, Mode};
use sprig::value::Value;
use sprig::{eval_text, parse};

#[test]
fn arithmetic_is_unchanged() {
    evals_strict![
        "(+ 2 (* 3 4))" => "14",
        "(- 10 3 2)" => "5",
        "(+ \"5\" 3)" => "8",
        "(+ '(5) 3)" => "8",
        "'(foo 1)" => "(foo 1)",
        "#f" => "#f"
    ];
}

#[test]
fn unknown_primitive() {
    fails![Mode::Strict,
        "(foo 1 2)" => UnboundFunction("Unrecognized primitive function args".into(), "foo".into()),
        "(+ 1 (bar))" => UnboundFunction("Unrecognized primitive function args".into(), "bar".into())
    ];
}

#[test]
fn type_mismatch() {
    fails![Mode::Strict,
        "(+ \"abc\" 3)" => TypeMismatch("number".into(), Value::new_string("abc")),
        "(+ \"5x\" 3)" => TypeMismatch("number".into(), Value::new_string("5x")),
        "(+ #t 3)" => TypeMismatch("number".into(), Value::Bool(true)),
        "(+ 'x 3)" => TypeMismatch("number".into(), Value::new_atom("x")),
        "(+ '(1 2) 3)" => TypeMismatch("number".into(), parse!("(1 2)"))
    ];
}

#[test]
fn arity() {
    fails![Mode::Strict,
        "(+ 1)" => NumArgs(2, vec![Value::from(1)]),
        "(-)" => NumArgs(2, vec![])
    ];
}

#[test]
fn malformed_quote() {
    fails![Mode::Strict,
        "(quote)" => BadSpecialForm("Malformed quote".into(), parse!("(quote)")),
        "(quote 1 2)" => BadSpecialForm("Malformed quote".into(), parse!("(quote 1 2)"))
    ];
}

#[test]
fn whole_input_must_parse() {
    assert_eq!(eval_text("(+ 1 2)", Mode::Strict), Ok(Value::from(3)));
    assert!(matches!(
        eval_text("(+ 1 2) (+ 3 4)", Mode::Strict),
        Err(ParserFailure(_))
    ));
    assert_eq!(eval_text("(+ 1 2) (+ 3 4)", Mode::Lenient), Ok(Value::from(3)));
}

#[test]
fn error_messages() {
    let evaluator = Evaluator::new(Mode::Strict);
    let message = |text: &str| evaluator.eval(&parse!(text)).unwrap_err().to_string();
    assert_eq!(message("(+ 1)"), "expected 2 args; found values 1");
    assert_eq!(
        message("(* \"x\" 1)"),
        "invalid type: expected number, found \"x\""
    );
    assert_eq!(message("()"), "Unrecognized special form: ()");
}
