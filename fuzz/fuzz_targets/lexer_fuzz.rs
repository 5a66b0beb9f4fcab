#![no_main]
use libfuzzer_sys::fuzz_target;
use munch::lexer::{LexerBuilder, LexerConfig, Pattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FuzzTokenKind {
    Ident,
    Number,
    Op,
    Eof,
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(lexer) = LexerBuilder::new()
        .keyword("if", FuzzTokenKind::Ident)
        .token(FuzzTokenKind::Ident, Pattern::regex("[a-z_][a-z0-9_]*"))
        .token(FuzzTokenKind::Number, Pattern::regex("[0-9]+"))
        .token(FuzzTokenKind::Op, Pattern::regex("[-+*/=<>]=?"))
        .ignore(Pattern::regex(r"\s+"))
        .config(LexerConfig {
            max_errors: usize::MAX,
            ..LexerConfig::default()
        })
        .build(FuzzTokenKind::Eof)
    else {
        return;
    };

    let mut driver = lexer.lexer(input.chars());
    let mut consumed = 0;
    loop {
        match driver.read_token() {
            Ok(token) if token.is_empty() => {
                assert_eq!(token.kind, FuzzTokenKind::Eof);
                break;
            }
            Ok(token) => {
                assert!(token.span.start.offset as usize >= consumed);
                consumed = token.span.end.offset as usize;
                assert_eq!(&input[token.span.start.offset as usize..consumed], token.text.as_str());
            }
            Err(_) => {
                assert!(driver.skip_char().is_some());
            }
        }
    }
    assert!(driver.is_at_end());
    assert_eq!(driver.location().offset as usize, input.len());
});
