use serde_json::Value;

use crate::telemetry::geo::distance_km;
use crate::telemetry::parsing::parse_position;
use crate::telemetry::SelectionResult;

struct Candidate {
    index: usize,
    lat: f64,
    lng: f64,
    // Distance to the nearest already-selected balloon
    nearest_km: f64,
}

/// Pick up to `target_count` balloons from the current hour that are spread
/// as far apart as possible (greedy farthest-point sampling).
///
/// The first valid entry seeds the selection; each following pick is the
/// candidate whose nearest selected neighbour is farthest away, ties going
/// to the lower raw index.
pub fn select_representative(current: &[Value], target_count: usize) -> SelectionResult {
    let mut remaining: Vec<Candidate> = current
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            parse_position(entry, 0).map(|p| Candidate {
                index,
                lat: p.lat,
                lng: p.lng,
                nearest_km: f64::INFINITY,
            })
        })
        .collect();
    let total_count = remaining.len();

    if target_count == 0 {
        return SelectionResult {
            indices: Vec::new(),
            total_count,
        };
    }

    if total_count <= target_count {
        return SelectionResult {
            indices: remaining.iter().map(|c| c.index).collect(),
            total_count,
        };
    }

    let mut indices = Vec::with_capacity(target_count);
    let mut last = remaining.remove(0);
    indices.push(last.index);

    while indices.len() < target_count && !remaining.is_empty() {
        let mut best = 0;
        let mut best_km = f64::NEG_INFINITY;

        for (i, candidate) in remaining.iter_mut().enumerate() {
            let km = distance_km(candidate.lat, candidate.lng, last.lat, last.lng);
            candidate.nearest_km = candidate.nearest_km.min(km);
            if candidate.nearest_km > best_km {
                best_km = candidate.nearest_km;
                best = i;
            }
        }

        last = remaining.remove(best);
        indices.push(last.index);
    }

    SelectionResult {
        indices,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::{json, Value};

    use super::select_representative;

    fn grid(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!([(i % 10) as f64 * 8.0 - 40.0, (i / 10) as f64 * 15.0 - 90.0, 12000.0]))
            .collect()
    }

    #[test]
    fn empty_input() {
        let result = select_representative(&[], 10);
        assert!(result.indices.is_empty());
        assert_eq!(result.total_count, 0);
    }

    #[test]
    fn all_unparseable() {
        let current = vec![json!(null), json!([1.0]), json!([100.0, 0.0])];
        let result = select_representative(&current, 2);
        assert!(result.indices.is_empty());
        assert_eq!(result.total_count, 0);
    }

    #[test]
    fn returns_everything_when_under_target() {
        let current = vec![
            json!([1.0, 1.0]),
            json!(null),
            json!([2.0, 2.0]),
            json!([3.0, 3.0]),
        ];
        let result = select_representative(&current, 3);
        assert_eq!(result.indices, vec![0, 2, 3]);
        assert_eq!(result.total_count, 3);

        let result = select_representative(&current, 50);
        assert_eq!(result.indices, vec![0, 2, 3]);
    }

    #[test]
    fn picks_farthest_points() {
        let current = vec![
            json!(null),
            json!([0.0, 0.0]),
            json!([0.0, 1.0]),
            json!([0.0, 90.0]),
            json!([0.0, 2.0]),
            json!([0.0, -90.0]),
        ];
        let result = select_representative(&current, 3);
        // seed is the first valid entry, then the farthest, then the farthest from both
        assert_eq!(result.indices, vec![1, 3, 5]);
        assert_eq!(result.total_count, 5);
    }

    #[test]
    fn ties_go_to_first_encountered() {
        let current = vec![
            json!([0.0, 0.0]),
            json!([0.0, 10.0]),
            json!([0.0, -10.0]),
        ];
        let result = select_representative(&current, 2);
        assert_eq!(result.indices, vec![0, 1]);
    }

    #[test]
    fn exact_count_of_distinct_valid_indices() {
        let mut current = grid(120);
        current[0] = json!(null);
        current[7] = json!("garbage");
        let result = select_representative(&current, 25);

        assert_eq!(result.total_count, 118);
        assert_eq!(result.indices.len(), 25);
        assert_eq!(result.indices[0], 1);

        let unique: HashSet<_> = result.indices.iter().collect();
        assert_eq!(unique.len(), 25);
        assert!(result.indices.iter().all(|&i| i != 0 && i != 7 && i < 120));
    }

    #[test]
    fn zero_target_selects_nothing() {
        let result = select_representative(&grid(5), 0);
        assert!(result.indices.is_empty());
        assert_eq!(result.total_count, 5);
    }

    #[test]
    fn duplicate_positions_are_still_filled() {
        let current = vec![json!([5.0, 5.0]); 4];
        let result = select_representative(&current, 3);
        assert_eq!(result.indices, vec![0, 1, 2]);
    }
}
