use bsptree::{LeafCache, Region, SpatialIndex, Vector};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

const DEPTH: u32 = 12;
const ENTITY_COUNT: u32 = 5000;

fn populated_tree(rng: &mut StdRng) -> (SpatialIndex<u32>, LeafCache<u32>, Vec<Vector>) {
    let region = Region::from_extent(0.0, 0.0, 1000.0, 1000.0);
    let mut tree = SpatialIndex::new(DEPTH, region.tl, region.br).unwrap();
    let mut cache = LeafCache::new();
    let mut positions = Vec::new();
    for id in 0..ENTITY_COUNT {
        let position = region.random_point_inside(rng);
        cache.insert(&mut tree, id, position);
        positions.push(position);
    }
    (tree, cache, positions)
}

fn build_benchmark(c: &mut Criterion) {
    c.bench_function("bsptree_build_depth_12", |b| {
        b.iter(|| {
            SpatialIndex::<u32>::new(
                black_box(DEPTH),
                Vector::new(0.0, 0.0),
                Vector::new(1000.0, 1000.0),
            )
            .unwrap()
        })
    });
}

fn insert_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let region = Region::from_extent(0.0, 0.0, 1000.0, 1000.0);
    let mut tree = SpatialIndex::new(DEPTH, region.tl, region.br).unwrap();
    let mut id = 0u32;

    c.bench_function("bsptree_insert", |b| {
        b.iter(|| {
            let position = region.random_point_inside(&mut rng);
            id = id.wrapping_add(1);
            tree.insert(black_box(id), position);
        })
    });
}

fn relocate_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let (mut tree, mut cache, mut positions) = populated_tree(&mut rng);
    let area = Vector::new(1000.0, 1000.0);

    c.bench_function("bsptree_relocate_step", |b| {
        b.iter(|| {
            for (id, position) in positions.iter_mut().enumerate() {
                let step = Vector::angled(rng.gen_range(0.0..std::f32::consts::TAU), 1.0);
                *position = (*position + step).wrap(area);
                cache.relocate(&mut tree, id as u32, *position);
            }
        })
    });
}

fn closest_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let (tree, cache, positions) = populated_tree(&mut rng);

    c.bench_function("bsptree_closest_cached_leaf", |b| {
        b.iter(|| {
            let id = rng.gen_range(0..ENTITY_COUNT);
            black_box(cache.closest(&tree, id, positions[id as usize], 20.0));
        })
    });

    c.bench_function("bsptree_closest_from_root_unbounded", |b| {
        b.iter(|| {
            let id = rng.gen_range(0..ENTITY_COUNT);
            black_box(tree.closest(id, positions[id as usize], f32::INFINITY));
        })
    });
}

criterion_group!(
    benches,
    build_benchmark,
    insert_benchmark,
    relocate_benchmark,
    closest_benchmark
);
criterion_main!(benches);
