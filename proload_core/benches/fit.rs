use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use proload_core::{CalibrationCoefficients, CalibrationPoint, evaluate, fit};

// Points along weight = 2500 v - 1250 with small deterministic jitter
fn synth_points(n: usize, seed: u32) -> Vec<CalibrationPoint> {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_f64 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        f64::from(x) / (f64::from(u32::MAX) + 1.0)
    };
    (0..n)
        .map(|i| {
            let v = 0.4 + 4.3 * (i as f64) / (n.max(2) - 1) as f64;
            let noise = (next_f64() * 2.0 - 1.0) * 5.0;
            CalibrationPoint::new(i as u32 + 1, v, 2500.0 * v - 1250.0 + noise)
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    for n in [2usize, 8, 64] {
        let pts = synth_points(n, 0xC0FFEE);
        group.bench_function(format!("ols_{n}"), |b| {
            b.iter_batched(
                || pts.clone(),
                |p| black_box(fit(black_box(&p))),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let coeffs = CalibrationCoefficients {
        slope: 2500.0,
        intercept: -1250.0,
    };
    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(3.3), coeffs, black_box(10_000.0), true))
    });
}

criterion_group!(benches, bench_fit, bench_evaluate);
criterion_main!(benches);
