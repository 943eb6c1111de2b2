use knap_challenges::{knapsack::*, KnapsackError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub mod full_table;
pub mod rolling_row;
pub use full_table::solve_with_selection;
pub use rolling_row::solve_value_only;

/// Upper bounds on the memory a single solve may allocate, counted in table entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SolverConfig {
    pub max_table_cells: usize,
    pub max_row_len: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_table_cells: 1 << 25,
            max_row_len: 1 << 25,
        }
    }
}

impl SolverConfig {
    /// Number of cells a full table needs for `capacity` and `num_items`.
    pub fn table_cells(&self, capacity: u32, num_items: usize) -> Result<usize> {
        let required = (capacity as usize + 1)
            .checked_mul(num_items + 1)
            .unwrap_or(usize::MAX);
        if required > self.max_table_cells {
            return Err(KnapsackError::CapacityExceeded {
                required,
                limit: self.max_table_cells,
            });
        }
        Ok(required)
    }

    pub fn row_len(&self, capacity: u32) -> Result<usize> {
        let required = capacity as usize + 1;
        if required > self.max_row_len {
            return Err(KnapsackError::CapacityExceeded {
                required,
                limit: self.max_row_len,
            });
        }
        Ok(required)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[serde(rename = "full")]
    FullTable,
    #[serde(rename = "rolling")]
    RollingRow,
    /// Full table when it fits the configured limit, rolling row otherwise.
    #[default]
    #[serde(rename = "auto")]
    Auto,
}

impl FromStr for Strategy {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(Strategy::FullTable),
            "rolling" => Ok(Strategy::RollingRow),
            "auto" => Ok(Strategy::Auto),
            _ => Err(KnapsackError::InvalidInput(format!(
                "unknown strategy '{}', expected one of full, rolling, auto",
                s
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Strategy::FullTable => "full",
            Strategy::RollingRow => "rolling",
            Strategy::Auto => "auto",
        };
        write!(f, "{}", name)
    }
}

impl Strategy {
    /// Resolves `Auto` against the instance size. Other strategies are returned as is.
    pub fn resolve(self, instance: &Instance, config: &SolverConfig) -> Strategy {
        match self {
            Strategy::Auto => {
                if config
                    .table_cells(instance.capacity, instance.num_items())
                    .is_ok()
                {
                    Strategy::FullTable
                } else {
                    Strategy::RollingRow
                }
            }
            s => s,
        }
    }
}

/// Solves `instance` with `strategy`. Only the full table yields a selection.
pub fn solve(instance: &Instance, strategy: Strategy, config: &SolverConfig) -> Result<Solution> {
    let resolved = strategy.resolve(instance, config);
    log::debug!(
        "solving {} items with capacity {} using {} strategy (requested {})",
        instance.num_items(),
        instance.capacity,
        resolved,
        strategy
    );
    match resolved {
        Strategy::RollingRow => {
            let value = solve_value_only(instance.capacity, &instance.items, config)?;
            Ok(Solution::new(value, None))
        }
        Strategy::FullTable | Strategy::Auto => {
            let (value, selection) =
                solve_with_selection(instance.capacity, &instance.items, config)?;
            Ok(Solution::new(value, Some(selection)))
        }
    }
}
