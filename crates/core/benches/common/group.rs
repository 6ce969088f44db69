use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;

use crate::bench_tier::BenchTier;

/// Collection sizes exercised at each tier.
pub fn list_sizes(tier: BenchTier) -> &'static [usize] {
    match tier {
        BenchTier::Quick => &[500, 5_000],
        BenchTier::Full => &[500, 5_000, 50_000],
    }
}

pub fn configure_group<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, tier: BenchTier) {
    let (sample_size, measurement) = match tier {
        BenchTier::Quick => (20, Duration::from_secs(3)),
        BenchTier::Full => (40, Duration::from_secs(6)),
    };
    group.sample_size(sample_size);
    group.measurement_time(measurement);
}
