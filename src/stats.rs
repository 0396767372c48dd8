use tracing::debug;

use crate::record::StudentRecord;

/// Recomputes `total` and `rate` for every record from its first
/// `min(considered, capacity)` marks. A zero denominator yields a rate of
/// `0.0`.
///
/// Hand-edited marks can be any `i64`, so the total saturates at the `i64`
/// bounds instead of overflowing.
pub fn recompute(records: &mut [StudentRecord], considered: usize, capacity: usize) {
    let considered = considered.min(capacity);
    debug!("Calculating totals and rates based on {considered} assignment(s).");

    for record in records.iter_mut() {
        let total = record
            .marks()
            .iter()
            .take(considered)
            .fold(0i64, |sum, &mark| sum.saturating_add(mark));
        let rate = if considered > 0 {
            total as f64 / considered as f64
        } else {
            0.0
        };
        record.set_stats(total, rate);
    }
}
