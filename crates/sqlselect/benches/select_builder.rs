use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlselect::{SelectQuery, SelectQueryBuilder};

/// SELECT col0, col1, ... FROM t WHERE col0=0 AND col1=1 ...
fn build_select(n: usize) -> SelectQuery {
    let mut qb = SelectQueryBuilder::new();
    for i in 0..n {
        qb.add_column(format!("col{i}"));
        qb.add_where(format!("col{i}"), i.to_string());
    }
    qb.add_from("t");
    qb.build()
}

fn bench_build_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_builder/build_query");

    for n in [1, 5, 10, 50, 100] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(query.build_query()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).build_query()));
        });
    }

    group.finish();
}

fn bench_bulk_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_builder/add_where_all");

    for n in [5, 20, 100, 500] {
        let pairs: Vec<(String, String)> = (0..n)
            .map(|i| (format!("col{i}"), i.to_string()))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &pairs, |b, pairs| {
            b.iter(|| {
                let mut qb = SelectQueryBuilder::new();
                qb.add_from("t").add_where_all(pairs.iter().cloned());
                black_box(qb.build().build_query());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_query,
    bench_build_and_render,
    bench_bulk_merge
);
criterion_main!(benches);
