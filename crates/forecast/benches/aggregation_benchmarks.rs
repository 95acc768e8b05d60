use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gridcast_forecast::pricing::UNIT_PRICES;
use gridcast_forecast::taxonomy::MATERIAL_TAXONOMY;
use gridcast_forecast::{aggregate, classify, display_breakdown, ForecastReport, MaterialLineItem};

/// A report shaped like a model response: every catalogue material, its
/// `_price` companion, and a handful of names the taxonomy does not know.
fn model_shaped_report(repeat: usize) -> ForecastReport {
    let mut materials = Vec::new();
    for round in 0..repeat {
        for (name, _) in UNIT_PRICES {
            let qty = 10.0 + round as f64;
            materials.push(MaterialLineItem::priced(*name, qty));
            materials.push(MaterialLineItem::priced(format!("{name}_price"), qty * 100.0));
        }
        materials.push(MaterialLineItem::priced(format!("material_{round}"), 1.0));
    }
    ForecastReport::from_materials(materials)
}

fn bench_classify(c: &mut Criterion) {
    let names: Vec<String> = MATERIAL_TAXONOMY
        .iter()
        .map(|(n, _)| n.to_string())
        .chain((0..20).map(|i| format!("unknown_{i}")))
        .chain((0..20).map(|i| format!("derived_{i}_price")))
        .collect();

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(names.len() as u64));
    group.bench_function("mixed_vocabulary", |b| {
        b.iter(|| {
            for name in &names {
                black_box(classify(black_box(name)));
            }
        })
    });
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for repeat in [1usize, 4, 16] {
        let report = model_shaped_report(repeat);
        group.throughput(Throughput::Elements(report.materials.len() as u64));
        group.bench_with_input(BenchmarkId::new("summary", repeat), &report, |b, r| {
            b.iter(|| black_box(aggregate(black_box(r))))
        });
        group.bench_with_input(BenchmarkId::new("display", repeat), &report, |b, r| {
            b.iter(|| black_box(display_breakdown(black_box(r))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_aggregate);
criterion_main!(benches);
