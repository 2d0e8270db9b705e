//! Betweenness and full-pass benchmarks over synthetic dependency graphs.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crux_analysis::{AnalysisConfig, AnalysisEngine, BufferPool, EdgeList};
use crux_analysis::metrics::betweenness;

struct Tier {
    name: &'static str,
    nodes: i64,
    edges_per_node: usize,
}

const TIERS: &[Tier] = &[
    Tier { name: "small", nodes: 100, edges_per_node: 3 },
    Tier { name: "medium", nodes: 1000, edges_per_node: 3 },
    Tier { name: "large", nodes: 5000, edges_per_node: 2 },
];

/// Random sparse DAG: edges only point forward, so every tier is acyclic
/// and the critical-path pass always applies.
fn synthetic_graph(tier: &Tier, seed: u64) -> EdgeList {
    let mut rng = StdRng::seed_from_u64(seed);
    let nodes: Vec<i64> = (0..tier.nodes).collect();
    let mut edges = Vec::with_capacity(nodes.len() * tier.edges_per_node);

    for &from in &nodes[..nodes.len() - 1] {
        for _ in 0..tier.edges_per_node {
            let to = rng.gen_range(from + 1..tier.nodes);
            edges.push((from, to));
        }
    }

    EdgeList::new(&nodes, &edges)
}

fn bench_betweenness(c: &mut Criterion) {
    let mut group = c.benchmark_group("betweenness");

    for tier in TIERS {
        let graph = synthetic_graph(tier, 0xBE7D_u64 + tier.nodes as u64);
        let pool = BufferPool::new();
        group.throughput(Throughput::Elements(tier.nodes as u64));

        if tier.nodes <= 1000 {
            group.bench_with_input(
                BenchmarkId::new("exact", tier.name),
                &graph,
                |b, graph| {
                    b.iter(|| black_box(betweenness::compute(graph, &pool, usize::MAX, 0, None)))
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::new("sampled_50", tier.name),
            &graph,
            |b, graph| b.iter(|| black_box(betweenness::compute(graph, &pool, 50, 7, None))),
        );
    }

    group.finish();
}

fn bench_full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze.adaptive");
    let engine = AnalysisEngine::new();

    for tier in TIERS {
        let graph = synthetic_graph(tier, 0xA7A1_u64 + tier.nodes as u64);
        let edge_count = (tier.nodes as usize - 1) * tier.edges_per_node;
        let config = AnalysisConfig::for_size(tier.nodes as usize, edge_count);

        group.bench_with_input(
            BenchmarkId::new("analyze", tier.name),
            &graph,
            |b, graph| b.iter(|| black_box(engine.analyze(graph, &config))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_betweenness, bench_full_pass);
criterion_main!(benches);
