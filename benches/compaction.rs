//! Benchmarks: incremental compaction updates vs full rebuilds

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vlog_graph::{
    BitSetFlags, Flags, GraphLayoutImpl, HiddenNodesGraph, IndexConfig, LinearGraph, ListIntToIntMap,
    NodeRef, PermanentLinearGraph, PrintedGraph, UpdatableIntToIntMap,
};

fn create_test_graph(node_count: usize) -> PermanentLinearGraph {
    // Mostly linear history with a merge every 50 commits
    let down = (0..node_count)
        .map(|i| {
            let mut parents = Vec::new();
            if i + 1 < node_count {
                parents.push(NodeRef::Index(i + 1));
            }
            if i % 50 == 0 && i + 7 < node_count {
                parents.push(NodeRef::Index(i + 7));
            }
            parents
        })
        .collect();
    PermanentLinearGraph::from_down_nodes(down)
}

fn bench_toggle_single_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_single_node");

    for size in [10_000, 100_000, 1_000_000] {
        let config = IndexConfig::default();
        let mut flags = BitSetFlags::new(size, true);
        let mut map = ListIntToIntMap::with_config(&flags, &config);

        group.bench_with_input(BenchmarkId::new("incremental", size), &size, |b, &size| {
            let node = size / 2;
            b.iter(|| {
                let current = flags.get(node);
                flags.set(node, !current);
                map.update(node, node, &flags);
                black_box(map.short_size());
            });
        });

        group.bench_with_input(BenchmarkId::new("rebuild", size), &size, |b, &size| {
            let node = size / 2;
            b.iter(|| {
                let current = flags.get(node);
                flags.set(node, !current);
                black_box(ListIntToIntMap::with_config(&flags, &config).short_size());
            });
        });
    }

    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookups");
    let size = 1_000_000;
    let flags = BitSetFlags::from_fn(size, |i| i % 3 != 0);

    for block_size in [16, 64, 256] {
        let map = ListIntToIntMap::with_config(&flags, &IndexConfig::new().block_size(block_size));
        let visible = map.short_size();

        group.bench_with_input(BenchmarkId::new("long_index", block_size), &visible, |b, &visible| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 7919) % visible;
                black_box(map.long_index(i, &flags));
            });
        });

        group.bench_with_input(BenchmarkId::new("short_index", block_size), &size, |b, &size| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 7919) % size;
                black_box(map.short_index(i, &flags));
            });
        });
    }

    group.finish();
}

fn bench_printed_rows(c: &mut Criterion) {
    let size = 100_000;
    let graph = create_test_graph(size);
    let layout = GraphLayoutImpl::build(&graph);
    let mut printed = PrintedGraph::new(HiddenNodesGraph::new(graph), layout).unwrap();
    printed.set_visibility_by(|i| i % 4 != 1);

    c.bench_function("printed_down_nodes_page", |b| {
        b.iter(|| {
            // One screen of rows
            for row in 5_000..5_060 {
                black_box(printed.down_nodes(row));
            }
        });
    });
}

criterion_group!(benches, bench_toggle_single_node, bench_lookups, bench_printed_rows);
criterion_main!(benches);
