//! Benchmarks for gfield arithmetic.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gfield::{conway_polynomial, Fp, GaloisField, Poly, Ring};

type F = Fp<1000003>;

fn bench_fp_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fp Operations");

    let a = F::new(123456);
    let b = F::new(654321);

    group.bench_function("add", |bencher| {
        bencher.iter(|| black_box(a) + black_box(b))
    });

    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(a) * black_box(b))
    });

    group.bench_function("inverse", |bencher| {
        bencher.iter(|| {
            use gfield::Field;
            black_box(a).inverse()
        })
    });

    group.bench_function("pow", |bencher| {
        bencher.iter(|| black_box(a).pow(1000002))
    });

    group.finish();
}

fn bench_poly_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Poly Operations");

    let coeffs: Vec<F> = (0u64..64).map(F::new).collect();
    let p = Poly::new(coeffs);
    let divisor = Poly::new((0u64..17).map(|i| F::new(i + 1)).collect());

    group.bench_function("mul_64x64", |bencher| {
        bencher.iter(|| black_box(p.clone()) * black_box(&p))
    });

    group.bench_function("div_rem_64_by_16", |bencher| {
        bencher.iter(|| black_box(&p).div_rem(black_box(&divisor)))
    });

    group.bench_function("eval_64", |bencher| {
        bencher.iter(|| black_box(&p).eval(F::new(42)))
    });

    let f = Poly::new(vec![F::new(1), F::ONE, F::ZERO, F::ZERO, F::ONE]);
    group.bench_function("powmod_x", |bencher| {
        bencher.iter(|| black_box(&f).powmod_x(1u64 << 40))
    });

    group.finish();
}

fn bench_conway(c: &mut Criterion) {
    let mut group = c.benchmark_group("Conway Polynomials");

    // First calls populate the cache; the measurements below show the
    // steady-state cost seen by field constructors.
    conway_polynomial::<2>(8).unwrap();
    conway_polynomial::<5>(4).unwrap();

    group.bench_function("cached_gf256", |bencher| {
        bencher.iter(|| conway_polynomial::<2>(8).unwrap())
    });

    group.bench_function("cached_gf625", |bencher| {
        bencher.iter(|| conway_polynomial::<5>(4).unwrap())
    });

    group.finish();
}

fn bench_field_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("GfElement Operations");

    let gf256 = GaloisField::<2>::new(8).unwrap();
    let a = gf256.element_from_ints(&[1, 0, 1, 1, 0, 0, 1, 1]);
    let b = gf256.element_from_ints(&[0, 1, 1, 0, 1, 0, 1, 0]);

    group.bench_function("mul_gf256", |bencher| {
        bencher.iter(|| black_box(&a).checked_mul(black_box(&b)).unwrap())
    });

    group.bench_function("inverse_gf256", |bencher| {
        bencher.iter(|| black_box(&a).inverse().unwrap())
    });

    group.bench_function("pow_gf256", |bencher| {
        bencher.iter(|| black_box(&a).pow(254))
    });

    let gf125 = GaloisField::<5>::new(3).unwrap();
    let s = gf125.element_from_ints(&[2, 3, 1]);
    let square = s.checked_mul(&s).unwrap();
    let mut rng = rand::thread_rng();

    group.bench_function("sqrt_gf125", |bencher| {
        bencher.iter(|| black_box(&square).sqrt(&mut rng).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fp_operations,
    bench_poly_operations,
    bench_conway,
    bench_field_elements
);
criterion_main!(benches);
