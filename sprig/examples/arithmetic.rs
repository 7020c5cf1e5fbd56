use log::error;
use sprig::eval::{Evaluator, Mode};
use sprig::list;
use sprig::value::Value;

extern crate sprig;

fn main() {
    let evaluator = Evaluator::new(Mode::Strict);

    for it in 0..5 {
        match evaluator.eval(&list!["*", it, list!["+", it, 1000]]) {
            Ok(result) => {
                println!("{} => {}", it, result);
                assert_eq!(result, Value::from(it * (it + 1000)))
            }
            Err(e) => error!("error: {}", e),
        }
    }

    match evaluator.eval(&list!["/", 1, 0]) {
        Ok(result) => println!("(/ 1 0) => {}", result),
        Err(e) => println!("(/ 1 0) => error: {}", e),
    }
}
