use super::SolverConfig;
use knap_challenges::{knapsack::Item, Result};

/// Best values indexed by `[weight][item prefix]`, stored row-major in one allocation.
struct Table {
    num_cols: usize,
    cells: Vec<u64>,
}

impl Table {
    fn new(num_cells: usize, num_cols: usize) -> Self {
        Self {
            num_cols,
            cells: vec![0; num_cells],
        }
    }

    #[inline]
    fn at(&self, weight: usize, prefix: usize) -> u64 {
        self.cells[weight * self.num_cols + prefix]
    }

    #[inline]
    fn set(&mut self, weight: usize, prefix: usize, value: u64) {
        self.cells[weight * self.num_cols + prefix] = value;
    }
}

fn build_table(capacity: usize, items: &[Item], num_cells: usize) -> Table {
    let mut table = Table::new(num_cells, items.len() + 1);
    for (prefix, item) in (1..=items.len()).zip(items) {
        let item_weight = item.weight as usize;
        for weight in 0..=capacity {
            // excluded: same budget, one fewer item
            let mut best = table.at(weight, prefix - 1);
            if item_weight <= weight {
                best = best.max(item.value as u64 + table.at(weight - item_weight, prefix - 1));
            }
            table.set(weight, prefix, best);
        }
    }
    table
}

/// Solves the instance with a full `(capacity + 1) x (items + 1)` table and backtracks
/// through it to recover which items were taken.
///
/// When several selections reach the optimum, the one returned is whatever the
/// last-to-first scan reads off the table: item `i` counts as taken exactly when the
/// best value at the current weight budget changes between prefixes `i - 1` and `i`.
pub fn solve_with_selection(
    capacity: u32,
    items: &[Item],
    config: &SolverConfig,
) -> Result<(u64, Vec<bool>)> {
    let num_cells = config.table_cells(capacity, items.len())?;
    let capacity = capacity as usize;
    let num_items = items.len();
    log::debug!(
        "allocating {}x{} table ({} cells)",
        capacity + 1,
        num_items + 1,
        num_cells
    );

    let table = build_table(capacity, items, num_cells);
    let value = table.at(capacity, num_items);
    let mut selection = vec![false; num_items];
    let mut weight = capacity;
    for prefix in (1..=num_items).rev() {
        if table.at(weight, prefix) != table.at(weight, prefix - 1) {
            selection[prefix - 1] = true;
            weight -= items[prefix - 1].weight as usize;
            log::trace!("item {} taken, {} weight left", prefix - 1, weight);
        }
    }

    Ok((value, selection))
}
