use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

/// Relaxes the visible causal subgraph into stable positions. Repulsion
/// and springs act freely on x; y is pulled toward a per-level band so
/// the causal depth always reads top-to-bottom. Nodes present in
/// `seeds` start from their previous position, which keeps the layout
/// calm when a click only adds or removes a few nodes.
pub(in crate::app) fn relax_layout(
    ids: &[String],
    levels: &[u32],
    half_extents: &[Vec2],
    edges: &[(usize, usize)],
    seeds: &HashMap<String, Vec2>,
    iterations: usize,
) -> Vec<Vec2> {
    let n = ids.len();
    if n == 0 {
        return Vec::new();
    }

    let base_radius = (n as f32).sqrt() * 240.0;
    let mut positions = ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            if let Some(&seed) = seeds.get(id) {
                return seed;
            }
            let angle = (index as f32 / n as f32) * TAU;
            let (jx, jy) = stable_pair(id);
            let jitter = vec2(jx * 160.0, jy * 160.0);
            vec2(angle.cos(), angle.sin()) * base_radius + jitter
        })
        .collect::<Vec<_>>();

    if n == 1 {
        positions[0].y = level_band(levels.first().copied().unwrap_or(0));
        return positions;
    }

    let extent = |index: usize| -> f32 {
        half_extents
            .get(index)
            .map(|half| half.x.max(half.y))
            .unwrap_or(40.0)
    };

    let area = (base_radius * 2.4).powi(2);
    let k = (area / n as f32).sqrt().max(24.0);
    let mut temperature = (k * 5.5).max(140.0);

    for _ in 0..iterations {
        let mut disp = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[i] - positions[j];
                let distance = delta.length().max(0.5);
                let direction = delta / distance;

                let ri = extent(i);
                let rj = extent(j);
                let min_distance = (ri + rj) * 1.5;

                let force = (k * k * (1.0 + (ri + rj) * 0.004)) / distance;
                disp[i] += direction * force;
                disp[j] -= direction * force;

                if distance < min_distance {
                    let overlap_push = (min_distance - distance) * 2.4;
                    disp[i] += direction * overlap_push;
                    disp[j] -= direction * overlap_push;
                }
            }
        }

        for &(from, to) in edges {
            if from >= n || to >= n || from == to {
                continue;
            }

            let delta = positions[from] - positions[to];
            let distance = delta.length().max(0.5);
            let direction = delta / distance;

            let ideal_length = k + (extent(from) + extent(to)) * 1.2;
            let force = (distance - ideal_length) * 0.18;

            disp[from] -= direction * force;
            disp[to] += direction * force;
        }

        // Gentle horizontal centering only; y belongs to the level pull.
        for i in 0..n {
            disp[i].x -= positions[i].x * 0.0012;
        }

        for i in 0..n {
            let d = disp[i];
            let length = d.length();
            if length > 0.0 {
                positions[i] += d / length * length.min(temperature) * 0.92;
            }
        }

        for i in 0..n {
            let target = level_band(levels.get(i).copied().unwrap_or(0));
            positions[i].y += (target - positions[i].y) * 0.35;
        }

        temperature *= 0.965;
        if temperature < 0.55 {
            break;
        }
    }

    positions
}

fn level_band(level: u32) -> f32 {
    level as f32 * 90.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let out = relax_layout(&[], &[], &[], &[], &HashMap::new(), 50);
        assert!(out.is_empty());
    }

    #[test]
    fn zero_iterations_returns_the_seeded_positions() {
        let seeds = HashMap::from([("a".to_owned(), vec2(17.0, -4.0))]);
        let out = relax_layout(
            &ids(&["a", "b"]),
            &[0, 1],
            &[vec2(40.0, 20.0); 2],
            &[(0, 1)],
            &seeds,
            0,
        );
        assert_eq!(out[0], vec2(17.0, -4.0));
        // Unseeded nodes get a deterministic ring placement.
        assert!(out[1].length() > 0.0);
    }

    #[test]
    fn layout_is_deterministic() {
        let node_ids = ids(&["root", "ce", "pv", "ev"]);
        let levels = [0, 1, 2, 3];
        let halves = vec![vec2(50.0, 24.0); 4];
        let edges = [(0, 1), (1, 2), (2, 3)];

        let a = relax_layout(&node_ids, &levels, &halves, &edges, &HashMap::new(), 120);
        let b = relax_layout(&node_ids, &levels, &halves, &edges, &HashMap::new(), 120);
        assert_eq!(a, b);
        assert!(a.iter().all(|pos| pos.x.is_finite() && pos.y.is_finite()));
    }

    #[test]
    fn causal_depth_orders_top_to_bottom() {
        let node_ids = ids(&["root", "mid", "leaf"]);
        let levels = [0, 1, 2];
        let halves = vec![vec2(44.0, 22.0); 3];
        let edges = [(0, 1), (1, 2)];

        let out = relax_layout(&node_ids, &levels, &halves, &edges, &HashMap::new(), 160);
        assert!(out[0].y < out[1].y);
        assert!(out[1].y < out[2].y);
    }
}
