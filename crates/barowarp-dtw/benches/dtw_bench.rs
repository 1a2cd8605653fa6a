//! Criterion benchmarks for barowarp-dtw: cost-only DP, full alignment, and sampling.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use barowarp_dtw::{Dtw, SamplerConfig, Series};

fn make_baro_series(n: usize, step_ms: f64, offset: f64) -> Series {
    Series::from_pairs((0..n).map(|i| {
        let t = i as f64 * step_ms;
        (t, (i as f64 * 0.01).sin() * 15.0 + offset)
    }))
    .unwrap()
}

fn bench_dtw_cost(c: &mut Criterion) {
    let lengths = [256usize, 1024, 4096];
    let bands = [10usize, 100];

    let mut group = c.benchmark_group("dtw_cost");

    for &len in &lengths {
        for &band in &bands {
            let id = BenchmarkId::new(format!("len{len}"), format!("w{band}"));
            let a = make_baro_series(len, 100.0, 0.0);
            let b = make_baro_series(len + len / 10, 95.0, 3.0);
            let dtw = Dtw::new(band);

            group.bench_with_input(id, &(a, b, dtw), |bencher, (a, b, dtw)| {
                bencher.iter(|| dtw.cost(a.as_view(), b.as_view()));
            });
        }
    }

    group.finish();
}

fn bench_dtw_align(c: &mut Criterion) {
    let a = make_baro_series(2000, 100.0, 0.0);
    let b = make_baro_series(2200, 95.0, 3.0);
    let dtw = Dtw::new(100);

    c.bench_function("dtw_align_2000x2200_w100", |bencher| {
        bencher.iter(|| dtw.align(a.as_view(), b.as_view()));
    });
}

fn bench_sample(c: &mut Criterion) {
    let a = make_baro_series(2000, 100.0, 0.0);
    let b = make_baro_series(2200, 95.0, 3.0);
    let alignment = Dtw::new(100).align(a.as_view(), b.as_view());
    let config = SamplerConfig::new(10).unwrap().with_height_offset(10.0);

    c.bench_function("sample_2000x2200_spacing10", |bencher| {
        bencher.iter(|| config.sample(&alignment.path, a.as_view(), b.as_view()).unwrap());
    });
}

criterion_group!(benches, bench_dtw_cost, bench_dtw_align, bench_sample);
criterion_main!(benches);
