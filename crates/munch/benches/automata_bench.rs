use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use munch::automata::{Dfa, Nfa};
use munch::lexer::Pattern;
use std::hint::black_box;

/// `(a|b)*a(a|b){n}`: the subset construction yields 2^(n+1) states
fn exponential_nfa(n: usize) -> Nfa {
    let ab = Nfa::union(&Nfa::singleton('a'), &Nfa::singleton('b'));
    let mut nfa = Nfa::concatenate(&Nfa::kleene(&ab), &Nfa::singleton('a'));
    for _ in 0..n {
        nfa = Nfa::concatenate(&nfa, &ab);
    }
    nfa
}

fn bench_determinize(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinize");
    for n in [4, 8, 10] {
        let nfa = exponential_nfa(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &nfa, |b, nfa| {
            b.iter(|| Dfa::from_nfa(black_box(nfa)));
        });
    }
    group.finish();
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    let identifier = Pattern::regex("[a-zA-Z_][a-zA-Z0-9_]*|[0-9]+(\\.[0-9]+)?")
        .compile(false)
        .expect("pattern is valid");
    group.bench_function("identifier_or_number", |b| {
        b.iter(|| black_box(&identifier).minimize());
    });
    for n in [4, 8] {
        let dfa = Dfa::from_nfa(&exponential_nfa(n));
        group.bench_with_input(BenchmarkId::new("exponential", n), &dfa, |b, dfa| {
            b.iter(|| black_box(dfa).minimize());
        });
    }
    group.finish();
}

fn bench_product(c: &mut Criterion) {
    let ident = Pattern::regex("[a-z]+").compile(true).expect("pattern is valid");
    let keywords = Pattern::regex("if|else|while|for|return|let")
        .compile(true)
        .expect("pattern is valid");
    c.bench_function("subtract_keywords", |b| {
        b.iter(|| Dfa::subtraction(black_box(&ident), black_box(&keywords)));
    });
    c.bench_function("intersect_keywords", |b| {
        b.iter(|| Dfa::intersection(black_box(&ident), black_box(&keywords)));
    });
}

criterion_group!(benches, bench_determinize, bench_minimize, bench_product);
criterion_main!(benches);
