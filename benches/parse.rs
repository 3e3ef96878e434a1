use chumsky::Parser;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dice_notation::Expr;

const BASIC_EXPR: &str = "4d8 + 4";
const COMPLEX_EXPR: &str = "4d8x8 + 2d10kh1 * (3d6r1 - 6 * 2) - 8d10cs>=7";
const ABSURD_EXPR: &str = "((100d42r<6x>37kh20 + 3d6dl1 * (2d20kl1 - 4)) * (d100 - (50 - 6d6x>=6cs=6)) + \
	10d10r<=2dh2 - 4d4 * (1 - (2 - (3 - (4 - d4))))) * 2 + 1d2 + 1d3 + 1d4 + 1d6 + 1d8 + 1d10 + 1d12 + 1d20";

fn parsing(c: &mut Criterion) {
	let parser = dice_notation::parser();
	c.bench_function("parse basic", |b| b.iter(|| parser.parse(black_box(BASIC_EXPR)).unwrap()));
	c.bench_function("parse complex", |b| b.iter(|| parser.parse(black_box(COMPLEX_EXPR)).unwrap()));
	c.bench_function("parse absurd", |b| b.iter(|| parser.parse(black_box(ABSURD_EXPR)).unwrap()));
	c.bench_function("parser creation", |b| b.iter(dice_notation::parser));
}

fn from_str(c: &mut Criterion) {
	c.bench_function("fromstr basic", |b| b.iter(|| black_box(BASIC_EXPR).parse::<Expr>().unwrap()));
	c.bench_function("fromstr complex", |b| b.iter(|| black_box(COMPLEX_EXPR).parse::<Expr>().unwrap()));
	c.bench_function("fromstr absurd", |b| b.iter(|| black_box(ABSURD_EXPR).parse::<Expr>().unwrap()));
}

criterion_group!(benches, parsing, from_str);
criterion_main!(benches);
