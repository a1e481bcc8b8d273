//! # Pocket CLI Front-End
//!
//! Line-oriented interface to the calculator engine. Every character of an
//! input line is one key press; after the line is consumed the current
//! display text is printed. On an engine error the fixed error message is
//! printed instead - the display string is never inspected in that case.
//!
//! ## Key map
//!
//! | Key       | Action                   |
//! |-----------|--------------------------|
//! | `0`-`9`   | digit                    |
//! | `.` / `,` | decimal point            |
//! | `e`       | exponent marker          |
//! | `n`       | toggle sign              |
//! | `+ - * /` | basic binary operations  |
//! | `^`       | power                    |
//! | `r`       | n-th root                |
//! | `k`       | binomial coefficient     |
//! | `!`       | factorial                |
//! | `=`       | evaluate                 |
//! | `b`       | backspace                |
//! | `c`       | cancel / clear error     |
//! | `d`       | dump engine state (JSON) |
//! | `q`       | quit                     |

use std::io::{self, BufRead, Write};

use pocket_core::engine::{BinaryOp, Engine, UnaryOp};
use pocket_core::errors::EngineResult;

fn apply_key(eng: &mut Engine, key: char) -> Option<EngineResult<String>> {
    match key {
        '0'..='9' => Some(eng.insert_digit(key)),
        '.' | ',' => Some(eng.insert_decimal_point()),
        'e' => Some(eng.insert_exponent()),
        'n' => Some(eng.negate()),
        '+' => Some(eng.select_binary(BinaryOp::Add)),
        '-' => Some(eng.select_binary(BinaryOp::Subtract)),
        '*' => Some(eng.select_binary(BinaryOp::Multiply)),
        '/' => Some(eng.select_binary(BinaryOp::Divide)),
        '^' => Some(eng.select_binary(BinaryOp::Power)),
        'r' => Some(eng.select_binary(BinaryOp::Root)),
        'k' => Some(eng.select_binary(BinaryOp::Combination)),
        '!' => Some(eng.apply_unary(UnaryOp::Factorial)),
        '=' => Some(eng.evaluate()),
        'b' => Some(eng.backspace()),
        'c' => Some(eng.cancel()),
        _ => None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Pocket CLI - Simple Calculator");
    println!("==============================");
    println!();
    println!("Keys: 0-9 . e n + - * / ^ r k ! = b c | d dump, q quit");
    println!();

    let stdin = io::stdin();
    let mut eng = Engine::new();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let mut last = None;
        for key in line.trim().chars() {
            match key {
                'q' => return,
                'd' => match serde_json::to_string_pretty(&eng) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("dump failed: {}", e),
                },
                _ if key.is_whitespace() => {}
                _ => match apply_key(&mut eng, key) {
                    Some(result) => last = Some(result),
                    None => eprintln!("unknown key: {}", key),
                },
            }
        }

        match last {
            Some(Ok(display)) => println!("{}", display),
            Some(Err(err)) => println!("{}", err),
            None => {}
        }
    }
}
