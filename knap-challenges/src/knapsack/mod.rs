use crate::{KnapsackError, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

mod format;
pub use format::*;

/// A single candidate item. Weights and values are non-negative by construction;
/// use [`Item::try_new`] when the numbers come from an untrusted source.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: u32,
    pub value: u32,
}

impl Item {
    pub fn new(weight: u32, value: u32) -> Self {
        Self { weight, value }
    }

    pub fn try_new(weight: i64, value: i64) -> Result<Self> {
        Ok(Self {
            weight: non_negative("weight", weight)?,
            value: non_negative("value", value)?,
        })
    }
}

pub(crate) fn non_negative(field: &str, n: i64) -> Result<u32> {
    if n < 0 {
        return Err(KnapsackError::InvalidInput(format!(
            "{} must be non-negative, got {}",
            field, n
        )));
    }
    u32::try_from(n).map_err(|_| {
        KnapsackError::InvalidInput(format!("{} ({}) does not fit in 32 bits", field, n))
    })
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub capacity: u32,
    pub items: Vec<Item>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub value: u64,
    /// One flag per item in input order. `None` when the solver kept no history.
    pub selection: Option<Vec<bool>>,
}

impl Solution {
    pub fn new(value: u64, selection: Option<Vec<bool>>) -> Self {
        Self { value, selection }
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection
            .iter()
            .flatten()
            .enumerate()
            .filter_map(|(i, &taken)| if taken { Some(i) } else { None })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorSettings {
    pub num_items: usize,
    pub max_item_weight: u32,
    pub max_item_value: u32,
    /// Capacity as a percentage of the summed item weights.
    pub capacity_percent: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            num_items: 20,
            max_item_weight: 50,
            max_item_value: 100,
            capacity_percent: 50,
        }
    }
}

impl Instance {
    pub fn new(capacity: u32, items: Vec<Item>) -> Self {
        Self { capacity, items }
    }

    pub fn try_new(capacity: i64, items: Vec<Item>) -> Result<Self> {
        Ok(Self {
            capacity: non_negative("capacity", capacity)?,
            items,
        })
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn generate_instance(seed: &[u8; 32], settings: &GeneratorSettings) -> Result<Self> {
        if settings.max_item_weight == 0 {
            return Err(KnapsackError::InvalidInput(
                "max_item_weight must be at least 1".to_string(),
            ));
        }
        let mut rng = SmallRng::from_seed(seed.clone());

        let items: Vec<Item> = (0..settings.num_items)
            .map(|_| {
                let weight = rng.gen_range(1..=settings.max_item_weight);
                let value = rng.gen_range(0..=settings.max_item_value);
                Item::new(weight, value)
            })
            .collect();

        let total_weight: u64 = items.iter().map(|item| item.weight as u64).sum();
        let capacity = total_weight
            .checked_mul(settings.capacity_percent as u64)
            .ok_or_else(|| {
                KnapsackError::InvalidInput(format!(
                    "capacity_percent ({}) of total weight ({}) overflows",
                    settings.capacity_percent, total_weight
                ))
            })?
            / 100;
        let capacity = u32::try_from(capacity).map_err(|_| {
            KnapsackError::InvalidInput(format!("generated capacity ({}) is too large", capacity))
        })?;

        log::debug!(
            "generated instance with {} items and capacity {}",
            items.len(),
            capacity
        );
        Ok(Self { capacity, items })
    }

    pub fn evaluate_selection(&self, selection: &[bool]) -> Result<(u64, u64)> {
        if selection.len() != self.items.len() {
            return Err(KnapsackError::InvalidSolution(format!(
                "Selection has {} entries but there are {} items",
                selection.len(),
                self.items.len()
            )));
        }
        Ok(self
            .items
            .iter()
            .zip(selection)
            .filter(|(_, taken)| **taken)
            .fold((0u64, 0u64), |(weight, value), (item, _)| {
                (weight + item.weight as u64, value + item.value as u64)
            }))
    }

    /// Checks that `solution` is feasible and that its selection is worth the
    /// value it claims. Returns the total selected weight.
    pub fn verify_solution(&self, solution: &Solution) -> Result<u64> {
        let selection = solution.selection.as_ref().ok_or_else(|| {
            KnapsackError::InvalidSolution("Solution carries no selection".to_string())
        })?;
        let (total_weight, total_value) = self.evaluate_selection(selection)?;
        if total_weight > self.capacity as u64 {
            return Err(KnapsackError::InvalidSolution(format!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight, self.capacity
            )));
        }
        if total_value != solution.value {
            return Err(KnapsackError::InvalidSolution(format!(
                "Selected items are worth {} but the solution claims {}",
                total_value, solution.value
            )));
        }
        Ok(total_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_rejects_large() {
        assert!(non_negative("weight", u32::MAX as i64).is_ok());
        assert!(matches!(
            non_negative("weight", u32::MAX as i64 + 1),
            Err(KnapsackError::InvalidInput(_))
        ));
    }
}
