//! Grouping and placement for categorical scatter plots

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half width of the strip plot jitter, in category widths
pub const JITTER: f64 = 0.1;

/// Largest swarm offset from the category center, in category widths
pub const SWARM_LIMIT: f64 = 0.4;

/// Seed for the strip plot jitter so repeated renders match
const JITTER_SEED: u64 = 0x1A15;

/// Values of y sharing one distinct x value
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub key: f64,
    pub label: String,
    pub values: Vec<f64>,
}

/// Group (x, y) pairs by distinct x, ascending, labelled with one decimal
pub fn group_by_category(pairs: &[(f64, f64)]) -> Vec<CategoryGroup> {
    let mut groups: BTreeMap<OrderedFloat<f64>, Vec<f64>> = BTreeMap::new();
    for &(x, y) in pairs {
        groups.entry(OrderedFloat(x)).or_default().push(y);
    }
    groups
        .into_iter()
        .map(|(key, values)| CategoryGroup {
            key: key.0,
            label: format!("{:.1}", key.0),
            values,
        })
        .collect()
}

/// Uniform offsets in [-JITTER, JITTER], one per value across all groups.
///
/// The generator is reseeded on every call so the layout never changes
/// between renders.
pub fn jitter_offsets(count: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(JITTER_SEED);
    (0..count).map(|_| rng.gen_range(-JITTER..=JITTER)).collect()
}

/// Beeswarm offsets for one group, in marker diameters.
///
/// `values` are already scaled so one unit is one marker diameter. Points are
/// placed bottom to top; each goes to the candidate position closest to the
/// center that does not overlap an already placed point. Offsets are clamped
/// to `limit` (also in marker diameters); a group too dense for that width
/// piles up on the edges.
pub fn swarm_offsets(values: &[f64], limit: f64) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut offsets = vec![0.0; values.len()];
    let mut placed: Vec<(f64, f64)> = Vec::with_capacity(values.len());

    for idx in order {
        let y = values[idx];
        let neighbours: Vec<(f64, f64)> = placed
            .iter()
            .copied()
            .filter(|&(_, py)| (py - y).abs() < 1.0)
            .collect();

        let mut candidates = vec![0.0];
        for &(px, py) in &neighbours {
            let dx = (1.0 - (py - y).powi(2)).sqrt();
            candidates.push(px + dx);
            candidates.push(px - dx);
        }
        candidates.sort_by(|a: &f64, b: &f64| a.abs().total_cmp(&b.abs()).then(a.total_cmp(b)));

        let x = candidates
            .into_iter()
            .find(|&cx| {
                neighbours
                    .iter()
                    .all(|&(px, py)| (cx - px).powi(2) + (y - py).powi(2) >= 1.0 - 1e-9)
            })
            .unwrap_or(0.0)
            .clamp(-limit, limit);

        offsets[idx] = x;
        placed.push((x, y));
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_sorted_numerically() {
        let pairs = [(10.0, 1.0), (2.0, 2.0), (10.0, 3.0), (4.5, 4.0)];
        let groups = group_by_category(&pairs);
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["2.0", "4.5", "10.0"]);
        assert_eq!(groups[2].values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_jitter_is_bounded_and_repeatable() {
        let first = jitter_offsets(500);
        assert!(first.iter().all(|j| j.abs() <= JITTER));
        assert_eq!(first, jitter_offsets(500));
        assert!(first.iter().any(|j| *j != first[0]));
    }

    #[test]
    fn test_swarm_has_no_overlaps() {
        let values = [0.0, 0.0, 0.0, 0.3, 0.5, 0.5, 1.4, 1.45, 1.5, 3.0];
        let offsets = swarm_offsets(&values, 100.0);
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                let d2 = (offsets[i] - offsets[j]).powi(2) + (values[i] - values[j]).powi(2);
                assert!(d2 >= 1.0 - 1e-6, "points {i} and {j} overlap");
            }
        }
    }

    #[test]
    fn test_swarm_keeps_isolated_points_centered() {
        let offsets = swarm_offsets(&[0.0, 2.0, 4.0], 10.0);
        assert_eq!(offsets, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_swarm_respects_limit() {
        let offsets = swarm_offsets(&[1.0; 9], 2.0);
        assert!(offsets.iter().all(|x| x.abs() <= 2.0));
    }
}
