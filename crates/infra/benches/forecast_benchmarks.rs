use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use stockcast_catalog::{Catalog, Product};
use stockcast_core::{ProductId, SeededRandom};
use stockcast_forecasting::ForecastPipeline;
use stockcast_infra::{BatchConfig, ForecastRunner};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

/// The sample catalog repeated until it holds `n` products (ids made unique).
fn catalog_of(n: usize) -> Vec<Product> {
    let sample = Catalog::sample().into_products();
    (0..n)
        .map(|i| {
            let mut p = sample[i % sample.len()].clone();
            p.id = ProductId::new(format!("{}-{i}", p.id)).unwrap();
            p
        })
        .collect()
}

fn bench_single_product(c: &mut Criterion) {
    let pipeline = ForecastPipeline::default();
    let product = Catalog::sample().products()[0].clone();

    c.bench_function("pipeline_single_product", |b| {
        b.iter(|| {
            let mut rng = SeededRandom::from_seed(1);
            black_box(pipeline.run(black_box(&product), as_of(), &mut rng).unwrap())
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecast_batch");

    for size in [10usize, 100, 1_000] {
        let products = catalog_of(size);
        group.throughput(Throughput::Elements(size as u64));

        for workers in [1usize, 4] {
            let runner = ForecastRunner::new(
                BatchConfig::default()
                    .with_seed(42)
                    .with_as_of(as_of())
                    .with_max_workers(workers),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("workers_{workers}"), size),
                &products,
                |b, products| b.iter(|| black_box(runner.run(products))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_single_product, bench_batch);
criterion_main!(benches);
