use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::prelude::*;

/// Build a SELECT with `n` escaped columns and `n` WHERE predicates:
/// SELECT `col0`, `col1`, ... FROM `t` WHERE `col0` = 'v0' AND `col1` = 'v1' ...
fn build_select(n: usize) -> MySqlQueryBuilder {
    let e = MySqlEscaper::new();
    let columns = (0..n)
        .map(|i| e.column(&format!("col{i}"), "").unwrap())
        .collect::<Vec<_>>();

    let mut b = MySqlQueryBuilder::new();
    b.select(&columns.join(", "))
        .from(&e.table("t", "").unwrap());
    for (i, column) in columns.iter().enumerate() {
        b.where_(column, &e.value(&format!("v{i}"), "", "").unwrap(), "=");
    }
    b
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("dml_builder/render");

    for n in [1, 5, 10, 50, 100] {
        let b = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &b, |bench, b| {
            bench.iter(|| black_box(b.get_select_query()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("dml_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter(|| {
                let b = build_select(n);
                black_box(b.get_select_query());
            });
        });
    }

    group.finish();
}

fn bench_nested_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("dml_builder/nested_groups");

    for depth in [1, 5, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bench, &depth| {
            bench.iter(|| {
                let mut b = DmlQueryBuilder::new();
                b.from("t");
                for i in 0..depth {
                    b.or().start_where_group().where_("a", &i.to_string(), "=");
                }
                for _ in 0..depth {
                    b.end_where_group().unwrap();
                }
                black_box(b.get_select_query());
            });
        });
    }

    group.finish();
}

fn bench_escape_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("dml_builder/escape_values");

    for n in [5, 20, 100, 500] {
        let values: Vec<String> = (0..n).map(|i| format!("it's value {i}\n")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |bench, values| {
            let e = MySqlEscaper::new();
            let refs: Vec<&str> = values.iter().map(String::as_str).collect();
            bench.iter(|| black_box(e.list_value(&refs).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_nested_groups,
    bench_escape_values
);
criterion_main!(benches);
