use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Editor, Result};
use rustyline_derive::{Completer, Helper, Highlighter, Hinter};
use sprig::eval::Mode;
use sprig::parse;
use sprig::primitive;

const MODE_VAR: &str = "SPRIG_MODE";

/// Keeps the prompt open while the expression is unbalanced.
#[derive(Completer, Helper, Highlighter, Hinter)]
struct InputValidator {}

impl Validator for InputValidator {
    fn validate(&self, ctx: &mut ValidationContext) -> Result<ValidationResult> {
        if ctx.input().trim().is_empty() {
            return Ok(ValidationResult::Valid(None));
        }
        match parse::parse_complete(ctx.input()) {
            Err(parse::Error::Incomplete(_)) => Ok(ValidationResult::Incomplete),
            _ => Ok(ValidationResult::Valid(None)),
        }
    }
}

fn main() {
    pretty_env_logger::init();

    let mut mode = match std::env::var(MODE_VAR) {
        Ok(text) => match text.parse::<Mode>() {
            Ok(mode) => mode,
            Err(e) => {
                warn!("ignoring {}: {}", MODE_VAR, e);
                Mode::default()
            }
        },
        Err(_) => Mode::default(),
    };

    let mut expr = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--strict" => mode = Mode::Strict,
            "--lenient" => mode = Mode::Lenient,
            "-h" | "--help" => {
                usage();
                return;
            }
            _ if expr.is_none() => expr = Some(arg),
            _ => debug!("ignoring extra argument {}", arg),
        }
    }

    let text = match expr {
        Some(text) => text,
        None => match read_expression() {
            Some(text) => text,
            None => return,
        },
    };

    debug!("evaluating {:?} in {} mode", text, mode);
    println!("{}", sprig::read_eval(&text, mode));
}

/// Prompt for a single expression.
fn read_expression() -> Option<String> {
    let mut rl: Editor<InputValidator, DefaultHistory> = match Editor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("error: {}", err);
            return None;
        }
    };
    rl.set_helper(Some(InputValidator {}));
    match rl.readline("> ") {
        Ok(line) => Some(line),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
        Err(err) => {
            eprintln!("error: {:#?}", err);
            None
        }
    }
}

fn usage() {
    println!("usage: sprig [--strict | --lenient] [EXPR]");
    println!();
    println!("Evaluate one expression and print the result. Without EXPR the");
    println!("expression is read from a prompt.");
    println!();
    println!("primitives: {}", primitive::names().join(" "));
    println!("environment: {} selects the default mode, RUST_LOG the log level", MODE_VAR);
}
