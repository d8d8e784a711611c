use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flownet::{max_flow, min_cost_max_flow, FlowGraph};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Layered network: source -> `width` x `layers` grid -> sink, with random
/// capacities and costs between consecutive layers.
fn layered_graph(layers: usize, width: usize, seed: u64) -> (FlowGraph<i64>, usize, usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = FlowGraph::new(layers * width + 2);
    let source = layers * width;
    let sink = source + 1;

    for i in 0..width {
        graph.add_edge(source, i, 1_000).unwrap();
        graph.add_edge((layers - 1) * width + i, sink, 1_000).unwrap();
    }
    for layer in 0..layers - 1 {
        for i in 0..width {
            for _ in 0..3 {
                let j = rng.gen_range(0..width);
                graph
                    .add_edge_with_cost(
                        layer * width + i,
                        (layer + 1) * width + j,
                        rng.gen_range(1..100),
                        rng.gen_range(0..50),
                    )
                    .unwrap();
            }
        }
    }
    (graph, source, sink)
}

fn bench_max_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_relabel");
    for &size in &[10, 30, 60] {
        let (graph, source, sink) = layered_graph(size, size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(max_flow(&mut graph, source, sink).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_min_cost_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("successive_shortest_paths");
    group.sample_size(20);
    for &size in &[10, 20, 30] {
        let (graph, source, sink) = layered_graph(size, size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(min_cost_max_flow(&mut graph, source, sink).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_max_flow, bench_min_cost_flow);
criterion_main!(benches);
