use super::SolverConfig;
use knap_challenges::{knapsack::Item, Result};

/// Computes the optimal value with a single row of `capacity + 1` entries.
/// Weights are visited from high to low so each item is counted at most once.
pub fn solve_value_only(capacity: u32, items: &[Item], config: &SolverConfig) -> Result<u64> {
    let row_len = config.row_len(capacity)?;
    let capacity = capacity as usize;
    log::debug!("allocating row of {} entries", row_len);

    let mut row = vec![0u64; row_len];
    for item in items {
        let item_weight = item.weight as usize;
        for weight in (item_weight..=capacity).rev() {
            row[weight] = row[weight].max(item.value as u64 + row[weight - item_weight]);
        }
    }
    Ok(row[capacity])
}
