//! Batch ordering and the per-tick deadline summary.
//!
//! Vehicles routed earlier in a tick see less projected congestion than the
//! ones routed after them, so the processing order is a policy choice.

use tr_core::Vehicle;

/// Order in which a batch is routed within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UrgencyOrder {
    /// Largest deadline first.
    #[default]
    MostSlackFirst,
    /// Smallest deadline first: the most urgent vehicles get the emptiest
    /// roads.
    LeastSlackFirst,
}

/// Borrow `batch` in routing order.
///
/// The sort is stable: vehicles with equal deadlines keep their batch order.
/// Deadlines are compared with `f64::total_cmp`, so NaN sorts
/// deterministically instead of poisoning the comparison.
pub fn order_batch(batch: &[Vehicle], order: UrgencyOrder) -> Vec<&Vehicle> {
    let mut ordered: Vec<&Vehicle> = batch.iter().collect();
    match order {
        UrgencyOrder::MostSlackFirst => {
            ordered.sort_by(|a, b| b.deadline.total_cmp(&a.deadline));
        }
        UrgencyOrder::LeastSlackFirst => {
            ordered.sort_by(|a, b| a.deadline.total_cmp(&b.deadline));
        }
    }
    ordered
}

/// Arithmetic mean of the batch deadlines; 0 for an empty batch.
pub fn mean_deadline(batch: &[Vehicle]) -> f64 {
    let sum: f64 = batch.iter().map(|v| v.deadline).sum();
    sum / batch.len().max(1) as f64
}
