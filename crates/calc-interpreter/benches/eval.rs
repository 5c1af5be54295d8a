use calc_interpreter::{evaluate, Env};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// An assignment whose right side chains `terms` operands over every binary
/// operator, with a parenthesized group every seventh operand.
fn source(terms: usize) -> String {
    let ops = ["+", "*", "^", "-", "/"];
    let mut source = "x0 = 1".to_string();
    for i in 1..terms {
        let op = ops[i % ops.len()];
        if i % 7 == 0 {
            source += &format!(" {op} ({i} + x)");
        } else {
            source += &format!(" {op} {i}");
        }
    }
    source
}

pub fn parse(c: &mut Criterion) {
    let lexicons = calc_syntax::tokenize(&source(200)).unwrap();
    c.bench_function("parse", |b| b.iter(|| calc_syntax::parse(black_box(&lexicons)).unwrap()));
}

pub fn eval(c: &mut Criterion) {
    let lexicons = calc_syntax::tokenize(&source(200)).unwrap();
    let expr = calc_syntax::parse(&lexicons).unwrap();
    let mut env = [("x", 0.5)].into_iter().collect::<Env>();
    c.bench_function("eval", |b| b.iter(|| evaluate(black_box(&expr), &mut env).unwrap()));
}

criterion_group!(benches, parse, eval);
criterion_main!(benches);
