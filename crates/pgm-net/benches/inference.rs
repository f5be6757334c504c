//! Criterion benchmarks for exact inference.
//!
//! Chains of binary variables, queried with evidence on the last node only,
//! so every other variable is summed out.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pgm_net::{Assignment, Network};
use pgm_types::assignment;

fn chain(len: usize) -> Network {
    let mut net = Network::new();
    for i in 0..len {
        net.add_node(&format!("x{i}"), ["F", "T"]);
    }

    let none = Assignment::new();
    net.set_probability("x0", "F", &none, 0.3);
    net.set_probability("x0", "T", &none, 0.7);

    for i in 1..len {
        let (parent, child) = (format!("x{}", i - 1), format!("x{i}"));
        net.add_arc(&parent, &child);
        for (given, stay) in [("F", 0.9), ("T", 0.8)] {
            let parents = assignment([(parent.as_str(), given)]);
            let flip = if given == "F" { "T" } else { "F" };
            net.set_probability(&child, given, &parents, stay);
            net.set_probability(&child, flip, &parents, 1.0 - stay);
        }
    }
    net
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for len in [4, 8, 12] {
        let net = chain(len);
        let evidence = assignment([(format!("x{}", len - 1), "T".to_string())]);
        group.bench_with_input(BenchmarkId::new("chain", len), &evidence, |b, evidence| {
            b.iter(|| black_box(net.query(black_box(evidence))));
        });
    }

    group.finish();
}

fn bench_infer(c: &mut Criterion) {
    let net = chain(8);
    let evidence = assignment([("x7", "F")]);
    c.bench_function("infer/chain_8", |b| {
        b.iter(|| black_box(net.infer(black_box("x0"), black_box(&evidence))));
    });
}

criterion_group!(benches, bench_query, bench_infer);
criterion_main!(benches);
