use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use small_parsimony::alphabets::{dna_alphabet, NUCLEOTIDES};
use small_parsimony::parsimony::{Algorithm, MatrixScoring, SimpleScoring, TreeLabeller};
use small_parsimony::tree::{Tree, TreeBuilder};

const SIZES: [(usize, usize); 4] = [(8, 1000), (32, 1000), (128, 500), (512, 200)];

fn random_tree(leaves: usize, length: usize) -> Tree {
    let mut rng = StdRng::seed_from_u64(42);
    let mut builder = TreeBuilder::new(leaves);
    for id in 0..leaves {
        let seq: Vec<u8> = (0..length)
            .map(|_| NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())])
            .collect();
        builder.add_leaf(id, &seq);
    }
    let mut roots: Vec<usize> = (0..leaves).collect();
    let mut next_id = leaves;
    while roots.len() > 1 {
        let x = roots.swap_remove(rng.gen_range(0..roots.len()));
        let y = roots.swap_remove(rng.gen_range(0..roots.len()));
        builder.add_edge(next_id, x);
        builder.add_edge(next_id, y);
        roots.push(next_id);
        next_id += 1;
    }
    builder.build(&dna_alphabet()).unwrap()
}

fn unit_cost_labelling(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("unit cost labelling");
    for (leaves, length) in SIZES {
        let tree = random_tree(leaves, length);
        for algorithm in [Algorithm::Fitch, Algorithm::Sankoff] {
            let labeller =
                TreeLabeller::with_algorithm(Box::new(SimpleScoring::default()), algorithm)
                    .unwrap();
            let id = BenchmarkId::new(algorithm.to_string(), format!("{}X{}", leaves, length));
            group.bench_with_input(id, &tree, |bench, tree| {
                bench.iter_batched_ref(
                    || tree.clone(),
                    |tree| black_box(labeller.label(tree).unwrap()),
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

fn weighted_labelling(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("transition transversion labelling");
    let scoring = MatrixScoring::transition_transversion(1.0, 2.0).unwrap();
    let labeller = TreeLabeller::new(Box::new(scoring));
    for (leaves, length) in SIZES {
        let tree = random_tree(leaves, length);
        let id = BenchmarkId::from_parameter(format!("{}X{}", leaves, length));
        group.bench_with_input(id, &tree, |bench, tree| {
            bench.iter_batched_ref(
                || tree.clone(),
                |tree| black_box(labeller.label(tree).unwrap()),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = labelling;
    config = Criterion::default().sample_size(20);
    targets = unit_cost_labelling, weighted_labelling
}
criterion_main!(labelling);
