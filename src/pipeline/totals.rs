use crate::model::{AggregateResult, GrandTotals};
use crate::util::format_megabytes;

/// Sum object counts and sizes across every prefix
pub fn reduce_totals(result: &AggregateResult) -> GrandTotals {
    let (total_count, total_size) = result.iter().fold((0u128, 0u128), |(count, size), (_, s)| {
        (count + u128::from(s.count), size + u128::from(s.size))
    });

    GrandTotals {
        total_count,
        total_size,
        total_size_mb: format_megabytes(total_size),
    }
}
