//! Benchmarks for claw-table.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use claw_table::Table;

fn container_table(rows: usize) -> Table {
    let mut table = Table::new(["Container ID", "Framework ID", "Name"]).unwrap();
    for i in 0..rows {
        table
            .add_row([
                format!("3f0c9d2e-8a41-4c7b-b1de-{i:012}"),
                format!("framework-{i}"),
                format!("task {i}"),
            ])
            .unwrap();
    }
    table
}

fn benchmark_render(c: &mut Criterion) {
    let table = container_table(500);

    c.bench_function("render_500_rows", |b| {
        b.iter(|| black_box(&table).render());
    });
}

fn benchmark_parse(c: &mut Criterion) {
    let text = container_table(500).render();

    c.bench_function("parse_500_rows", |b| {
        b.iter(|| Table::parse(black_box(&text)).unwrap());
    });
}

criterion_group!(benches, benchmark_render, benchmark_parse);
criterion_main!(benches);
