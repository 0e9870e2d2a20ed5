use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use meeting_merkle::{build_tree, generate_proof, verify, Item};

const SALT: &str = "bench-salt";

fn make_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            Item::new(
                format!("Agenda point {i}"),
                format!("Resolution {i}: carried with {} votes.\r\nFollow up next week.", i % 9),
            )
        })
        .collect()
}

fn payload_bytes(items: &[Item]) -> u64 {
    items
        .iter()
        .map(|item| (SALT.len() + item.agenda.len() + item.notes.len() + 2) as u64)
        .sum()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");
    for &size in &[8usize, 128, 2_048] {
        let items = make_items(size);
        group.throughput(Throughput::Bytes(payload_bytes(&items)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| build_tree(items, Some(SALT)).unwrap());
        });
    }
    group.finish();
}

fn bench_prove(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_proof");
    for &size in &[8usize, 128, 2_048] {
        let items = make_items(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| generate_proof(items, items.len() - 1, Some(SALT)).unwrap());
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    for &size in &[8usize, 128, 2_048] {
        let proof = generate_proof(&make_items(size), size / 2, Some(SALT)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &proof, |b, proof| {
            b.iter(|| assert!(verify(&proof.leaf, &proof.proof, &proof.root)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_prove, bench_verify);
criterion_main!(benches);
