#[allow(unused_macros)]
macro_rules! evals {
    ($($lhs:expr => $rhs:expr),+) => {{
        let evaluator = Evaluator::default();
         $(
            assert_eq!(evaluator.eval(&parse!($lhs)), Ok(parse!($rhs)), "{}", $lhs);
         )+
    }};
}

#[allow(unused_macros)]
macro_rules! evals_strict {
    ($($lhs:expr => $rhs:expr),+) => {{
        let evaluator = Evaluator::new(Mode::Strict);
         $(
            assert_eq!(evaluator.eval(&parse!($lhs)), Ok(parse!($rhs)), "{}", $lhs);
         )+
    }};
}

#[allow(unused_macros)]
macro_rules! prints {
    ($($lhs:expr => $rhs:expr),+) => {{
        let evaluator = Evaluator::default();
         $(
            assert_eq!(evaluator.eval(&parse!($lhs)).unwrap().to_string(), $rhs);
         )+
    }};
}

#[allow(unused_macros)]
macro_rules! fails {
    ($mode:expr, $($lhs:expr => $rhs:expr),+) => {{
        let evaluator = Evaluator::new($mode);
         $(
            assert_eq!(evaluator.eval(&parse!($lhs)), Err($rhs), "{}", $lhs);
         )+
    }};
}
