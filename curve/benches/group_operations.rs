use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{multi_scalar_mul, random_scalar, scalar_pow, Point};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_scalar_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);
    let g = Point::GENERATOR;

    c.bench_function("scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(g) * black_box(scalar)))
    });
}

fn bench_scalar_pow(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let base = random_scalar(&mut rng);

    c.bench_function("scalar_pow", |bencher| {
        bencher.iter(|| black_box(scalar_pow(black_box(&base), black_box(u64::MAX))))
    });
}

fn bench_multi_scalar_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let scalars: Vec<_> = (0..8).map(|_| random_scalar(&mut rng)).collect();
    let points: Vec<_> = scalars.iter().map(|s| Point::GENERATOR * s).collect();

    c.bench_function("multi_scalar_mul_8", |bencher| {
        bencher.iter(|| black_box(multi_scalar_mul(black_box(&points), black_box(&scalars))))
    });
}

criterion_group!(
    benches,
    bench_scalar_mul,
    bench_scalar_pow,
    bench_multi_scalar_mul
);
criterion_main!(benches);
