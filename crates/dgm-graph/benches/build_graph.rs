use dgm_core::rng::RngHandle;
use dgm_core::CanvasId;
use dgm_graph::{gen_random_diagram, DiagramShape, HypergraphManager};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_graph_bench(c: &mut Criterion) {
    let shape = DiagramShape {
        nodes: 5_000,
        edges: 4_000,
        unions: 500,
        max_endpoints: 3,
    };
    c.bench_function("build_diagram_5k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            let mut manager = HypergraphManager::default();
            gen_random_diagram(&mut manager, CanvasId::from_raw(0), shape, &mut rng).unwrap();
            black_box(manager);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
