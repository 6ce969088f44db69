use criterion::{Criterion, Throughput};

pub type BenchCriterion = Criterion;

pub fn bench_criterion() -> BenchCriterion {
    Criterion::default().configure_from_args()
}

/// Throughput in splits per iteration.
pub fn cuts_throughput(cuts: usize) -> Throughput {
    Throughput::Elements(cuts as u64)
}
