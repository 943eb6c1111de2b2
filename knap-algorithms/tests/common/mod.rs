use knap_challenges::knapsack::{Instance, Item};
use rand::{rngs::SmallRng, Rng};

/// Exhaustive subset enumeration. Only usable for small item counts.
pub fn brute_force(capacity: u32, items: &[Item]) -> u64 {
    assert!(items.len() <= 20, "brute force over {} items", items.len());
    (0u32..1 << items.len())
        .filter_map(|mask| {
            let (weight, value) = items
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .fold((0u64, 0u64), |(w, v), (_, item)| {
                    (w + item.weight as u64, v + item.value as u64)
                });
            if weight <= capacity as u64 {
                Some(value)
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0)
}

pub fn random_instance(rng: &mut SmallRng, max_items: usize) -> Instance {
    let num_items = rng.gen_range(0..=max_items);
    let items = (0..num_items)
        .map(|_| Item::new(rng.gen_range(0..=20), rng.gen_range(0..=30)))
        .collect();
    Instance::new(rng.gen_range(0..=60), items)
}
