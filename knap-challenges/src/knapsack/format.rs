use super::{non_negative, Instance, Item, Solution};
use crate::{KnapsackError, Result};
use std::{fmt::Write, str::FromStr};

/// Parses the line-oriented instance format:
///
/// ```text
/// <item_count> <capacity>
/// <value> <weight>
/// ...
/// ```
///
/// Trailing blank lines are ignored. Anything else after the declared items is rejected.
pub fn parse_instance(input: &str) -> Result<Instance> {
    let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (line_no, header) = lines.next().ok_or_else(|| KnapsackError::ParseError {
        line: 1,
        reason: "missing header".to_string(),
    })?;
    let [item_count, capacity] = parse_pair(line_no, header)?;
    let item_count = non_negative("item count", item_count)? as usize;
    let capacity = non_negative("capacity", capacity)?;

    // the header count is untrusted; never reserve more than the input could hold
    let mut items = Vec::with_capacity(item_count.min(input.lines().count()));
    for _ in 0..item_count {
        let (line_no, line) = lines.next().ok_or_else(|| KnapsackError::ParseError {
            line: items.len() + 2,
            reason: format!(
                "expected {} items but the input ends after {}",
                item_count,
                items.len()
            ),
        })?;
        let [value, weight] = parse_pair(line_no, line)?;
        items.push(Item::try_new(weight, value)?);
    }

    if let Some((line_no, _)) = lines.find(|(_, line)| !line.trim().is_empty()) {
        return Err(KnapsackError::ParseError {
            line: line_no,
            reason: format!("unexpected data after {} items", item_count),
        });
    }

    Ok(Instance { capacity, items })
}

fn parse_pair(line_no: usize, line: &str) -> Result<[i64; 2]> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(KnapsackError::ParseError {
            line: line_no,
            reason: format!("expected 2 fields, found {}", fields.len()),
        });
    }
    let mut pair = [0i64; 2];
    for (slot, field) in pair.iter_mut().zip(&fields) {
        *slot = field.parse::<i64>().map_err(|e| KnapsackError::ParseError {
            line: line_no,
            reason: format!("'{}' is not an integer: {}", field, e),
        })?;
    }
    Ok(pair)
}

impl FromStr for Instance {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self> {
        parse_instance(s)
    }
}

impl Instance {
    /// Renders the instance back into the format accepted by [`parse_instance`].
    pub fn to_text(&self) -> String {
        let mut out = format!("{} {}\n", self.items.len(), self.capacity);
        for item in &self.items {
            let _ = writeln!(out, "{} {}", item.value, item.weight);
        }
        out
    }
}

/// Renders a solution as `<value> <optimal>` followed by the 0/1 selection line.
/// Solutions are exact, so the optimality flag is always 1.
pub fn format_solution(solution: &Solution) -> String {
    let mut out = format!("{} 1", solution.value);
    if let Some(selection) = &solution.selection {
        let flags: Vec<&str> = selection
            .iter()
            .map(|&taken| if taken { "1" } else { "0" })
            .collect();
        out.push('\n');
        out.push_str(&flags.join(" "));
    }
    out
}
