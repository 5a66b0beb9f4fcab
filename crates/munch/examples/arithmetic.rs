//! Arithmetic expression scanner example
//!
//! This example demonstrates how to:
//! 1. Define token kinds
//! 2. Build a lexer from literal and regex patterns
//! 3. Tokenize input and print tokens with their locations
//! 4. Report scanning errors with source context

use munch::lexer::{CharSet, LexerBuilder, LexerConfig, Pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ArithTokenKind {
    Number,
    Ident,
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    LParen,
    RParen,
    Eof,
}

fn main() {
    use ArithTokenKind::*;

    let lexer = LexerBuilder::new()
        .token(
            Number,
            Pattern::Seq(vec![
                Pattern::one_or_more(Pattern::CharClass(CharSet::digits())),
                Pattern::regex(r"(\.[0-9]+)?"),
            ]),
        )
        .token(Ident, Pattern::regex("[a-z][a-z0-9]*"))
        .token(Power, Pattern::literal("**"))
        .token(Plus, Pattern::literal("+"))
        .token(Minus, Pattern::literal("-"))
        .token(Multiply, Pattern::literal("*"))
        .token(Divide, Pattern::literal("/"))
        .token(LParen, Pattern::literal("("))
        .token(RParen, Pattern::literal(")"))
        .ignore(Pattern::CharClass(CharSet::whitespace()))
        .config(LexerConfig::default())
        .build(Eof)
        .expect("Failed to build lexer");

    let inputs = ["42 + x1 * (3.5 - y)", "2 ** 10\n  / 4", "1 + @ 2 # 3"];

    for input in inputs {
        println!("Input: {input:?}");
        match lexer.tokenize(input) {
            Ok(tokens) => {
                for token in &tokens {
                    println!("  {token}");
                }
            }
            Err(errors) => {
                for error in &errors {
                    println!("  error: {error}");
                    println!("{}", error.format_with_context(input));
                }
            }
        }
        println!();
    }
}
