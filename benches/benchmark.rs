use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use rbtree::RedBlackTree;

const N: i32 = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let sorted: Vec<i32> = (0..N).collect();
    let mut shuffled = sorted.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(0));

    c.bench_function("insert_sorted", |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::new();
            for value in &sorted {
                tree.insert(*value);
            }
            tree
        })
    });

    c.bench_function("insert_shuffled", |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::new();
            for value in &shuffled {
                tree.insert(*value);
            }
            tree
        })
    });

    let tree: RedBlackTree = shuffled.iter().copied().collect();

    c.bench_function("search", |b| {
        b.iter(|| {
            for value in &sorted {
                black_box(tree.search(*value));
            }
        })
    });

    c.bench_function("delete", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for value in &shuffled {
                    let _ = black_box(tree.delete(*value));
                }
                tree
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
