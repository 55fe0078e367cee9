use criterion::{black_box, criterion_group, criterion_main, Criterion};
use php_to_go::{parser, ConvertOptions, Converter, StdlibHook};

const SOURCE: &str = include_str!("../tests/fixtures/fibonacci.php");

fn conversion_benchmark(c: &mut Criterion) {
    c.bench_function("parse_fibonacci", |b| {
        b.iter(|| {
            black_box(parser::parse(black_box(SOURCE)).unwrap());
        });
    });

    c.bench_function("convert_fibonacci", |b| {
        let mut converter = Converter::with_options(ConvertOptions::default());
        converter.install(&StdlibHook::new()).unwrap();
        b.iter(|| {
            black_box(converter.convert(black_box(SOURCE)).unwrap());
        });
    });
}

criterion_group!(benches, conversion_benchmark);
criterion_main!(benches);
