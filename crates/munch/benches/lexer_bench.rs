use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use munch::lexer::{CharSet, CompiledLexer, LexerBuilder, Pattern};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BenchTokenKind {
    Let,
    Fn,
    Ident,
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eq,
    EqEq,
    Semi,
    Eof,
}

fn build_lexer(minimize: bool) -> CompiledLexer<BenchTokenKind> {
    use BenchTokenKind::*;

    LexerBuilder::new()
        .keyword("let", Let)
        .keyword("fn", Fn)
        .token(Ident, Pattern::regex("[a-zA-Z_][a-zA-Z0-9_]*"))
        .token(
            Number,
            Pattern::one_or_more(Pattern::CharClass(CharSet::digits())),
        )
        .token(Plus, Pattern::literal("+"))
        .token(Minus, Pattern::literal("-"))
        .token(Star, Pattern::literal("*"))
        .token(Slash, Pattern::literal("/"))
        .token(LParen, Pattern::literal("("))
        .token(RParen, Pattern::literal(")"))
        .token(EqEq, Pattern::literal("=="))
        .token(Eq, Pattern::literal("="))
        .token(Semi, Pattern::literal(";"))
        .ignore(Pattern::regex(r"\s+"))
        .config(munch::LexerConfig {
            minimize,
            ..munch::LexerConfig::default()
        })
        .build(Eof)
        .expect("benchmark lexer is valid")
}

fn generate_source(statements: usize) -> String {
    let mut source = String::new();
    for i in 0..statements {
        source.push_str(&format!(
            "let value_{i} = (left_{i} + {i}) * 42 - right / 7;\n"
        ));
        if i % 10 == 0 {
            source.push_str("fn check == letter;\n");
        }
    }
    source
}

fn bench_tokenize(c: &mut Criterion) {
    let lexer = build_lexer(true);
    let mut group = c.benchmark_group("tokenize");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for statements in [10, 100, 1000] {
        let source = generate_source(statements);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(statements),
            &source,
            |b, source| b.iter(|| lexer.tokenize(black_box(source))),
        );
    }
    group.finish();
}

fn bench_minimized_vs_raw(c: &mut Criterion) {
    let source = generate_source(200);
    let mut group = c.benchmark_group("minimization_effect");
    group.throughput(Throughput::Bytes(source.len() as u64));

    for minimize in [true, false] {
        let lexer = build_lexer(minimize);
        let name = if minimize { "minimized" } else { "raw" };
        group.bench_with_input(BenchmarkId::new(name, 200), &source, |b, source| {
            b.iter(|| lexer.tokenize(black_box(source)));
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_lexer", |b| b.iter(|| build_lexer(black_box(true))));
}

criterion_group!(benches, bench_tokenize, bench_minimized_vs_raw, bench_build);
criterion_main!(benches);
