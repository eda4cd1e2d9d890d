//! Radial tree layout: recursive angular partition of the visible
//! hierarchy. Pure function of (tree, expansion set); no render or
//! animation state leaks in here.

use std::collections::HashMap;
use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use super::expansion::ExpansionSet;
use crate::data::HierarchyNode;

/// Orbit radius per depth level. Increments shrink with depth to keep
/// the full drill-down inside a workable canvas.
pub const LEVEL_RADII: [f32; 8] = [0.0, 260.0, 460.0, 630.0, 780.0, 910.0, 1020.0, 1120.0];

#[derive(Clone, Copy, Debug)]
pub struct Placed {
    pub pos: Vec2,
    pub level: usize,
    /// Angular interval `[start, end)` this node's subtree occupies.
    pub span: (f32, f32),
}

/// A collapsed subtree counts as a single leaf no matter how large it
/// really is, so a branch's visual share grows only as it is expanded.
pub fn count_visible_leaves(node: &HierarchyNode, expanded: &ExpansionSet) -> usize {
    if !expanded.contains(&node.id) || node.children.is_empty() {
        return 1;
    }
    node.children
        .iter()
        .map(|child| count_visible_leaves(child, expanded))
        .sum()
}

/// Assigns every visible node a polar position. The root sits at the
/// origin owning the full circle, starting at "up" (-pi/2).
pub fn radial_layout(root: &HierarchyNode, expanded: &ExpansionSet) -> HashMap<String, Placed> {
    let mut out = HashMap::new();
    assign(root, -PI * 0.5, PI * 1.5, 0, expanded, &mut out);
    out
}

fn assign(
    node: &HierarchyNode,
    start: f32,
    end: f32,
    level: usize,
    expanded: &ExpansionSet,
    out: &mut HashMap<String, Placed>,
) {
    let mid = (start + end) * 0.5;
    let radius = LEVEL_RADII[level.min(LEVEL_RADII.len() - 1)];
    let pos = if level == 0 {
        Vec2::ZERO
    } else {
        vec2(mid.cos(), mid.sin()) * radius
    };
    out.insert(
        node.id.clone(),
        Placed {
            pos,
            level,
            span: (start, end),
        },
    );

    if !expanded.contains(&node.id) || node.children.is_empty() {
        return;
    }

    let leaf_counts: Vec<usize> = node
        .children
        .iter()
        .map(|child| count_visible_leaves(child, expanded))
        .collect();
    let total: usize = leaf_counts.iter().sum();
    let arc = end - start;

    let mut cursor = start;
    for (child, leaves) in node.children.iter().zip(&leaf_counts) {
        // Equal-weight fallback keeps the partition well defined if the
        // leaf total ever degenerates to zero.
        let share = if total == 0 {
            1.0 / node.children.len() as f32
        } else {
            *leaves as f32 / total as f32
        };
        let child_arc = arc * share;
        assign(child, cursor, cursor + child_arc, level + 1, expanded, out);
        cursor += child_arc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{NodeKind, sample_tree};

    const TOLERANCE: f32 = 1e-4;

    fn leaf(id: &str) -> HierarchyNode {
        HierarchyNode {
            id: id.to_owned(),
            label: id.to_owned(),
            value: 1.0,
            variance: 1.0,
            kind: NodeKind::Process,
            relation: None,
            children: Vec::new(),
        }
    }

    fn two_child_tree() -> HierarchyNode {
        HierarchyNode {
            id: "root".into(),
            label: "HBM_001".into(),
            value: 552.8,
            variance: 45.3,
            kind: NodeKind::Root,
            relation: None,
            children: vec![leaf("p1"), leaf("p2")],
        }
    }

    #[test]
    fn root_only_expansion_splits_circle_evenly() {
        let tree = two_child_tree();
        let expanded = ExpansionSet::with_root("root");
        let layout = radial_layout(&tree, &expanded);

        assert_eq!(layout.len(), 3);
        let root = layout["root"];
        assert_eq!(root.pos, Vec2::ZERO);
        assert_eq!(root.level, 0);

        for id in ["p1", "p2"] {
            let placed = layout[id];
            assert_eq!(placed.level, 1);
            let width = placed.span.1 - placed.span.0;
            assert!((width - PI).abs() < TOLERANCE, "{id} got width {width}");
            assert!((placed.pos.length() - LEVEL_RADII[1]).abs() < TOLERANCE);
        }
    }

    #[test]
    fn children_partition_exactly_covers_the_parent_span() {
        let tree = sample_tree();
        let mut expanded = ExpansionSet::with_root("root");
        expanded.expand_all(&tree);
        let layout = radial_layout(&tree, &expanded);

        fn check(node: &HierarchyNode, layout: &HashMap<String, Placed>, expanded: &ExpansionSet) {
            let parent = layout[&node.id];
            if expanded.contains(&node.id) && !node.children.is_empty() {
                let child_sum: f32 = node
                    .children
                    .iter()
                    .map(|child| {
                        let span = layout[&child.id].span;
                        span.1 - span.0
                    })
                    .sum();
                let parent_width = parent.span.1 - parent.span.0;
                assert!(
                    (child_sum - parent_width).abs() < 1e-3,
                    "{}: children cover {child_sum}, parent {parent_width}",
                    node.id
                );
                // Contiguous, in order: each child starts where the
                // previous one ended.
                let mut cursor = parent.span.0;
                for child in &node.children {
                    let span = layout[&child.id].span;
                    assert!((span.0 - cursor).abs() < 1e-3);
                    cursor = span.1;
                }
                for child in &node.children {
                    check(child, layout, expanded);
                }
            }
        }
        check(&tree, &layout, &expanded);
    }

    #[test]
    fn leaf_count_never_decreases_as_expansion_grows() {
        let tree = sample_tree();
        let mut expanded = ExpansionSet::with_root("root");
        let mut previous = count_visible_leaves(&tree, &expanded);

        for id in ["p1", "e1-1", "d1-1-1", "p2", "e2-1"] {
            expanded.toggle(id, &tree);
            let current = count_visible_leaves(&tree, &expanded);
            assert!(current >= previous, "leaf count dropped after {id}");
            previous = current;
        }
    }

    #[test]
    fn drilling_into_a_node_keeps_its_angular_width() {
        let tree = sample_tree();
        let mut expanded = ExpansionSet::with_root("root");
        expanded.toggle("p1", &tree);
        expanded.toggle("e1-1", &tree);

        let before = radial_layout(&tree, &expanded);
        let visible_before = before.len();

        expanded.toggle("e1-1", &tree); // collapse back
        expanded.toggle("e1-1", &tree); // and re-expand
        let layout = radial_layout(&tree, &expanded);
        assert_eq!(layout.len(), visible_before);

        // e1-1 has exactly 3 children; they appear one level deeper and
        // their arcs sum to e1-1's own arc.
        let parent = layout["e1-1"];
        let children = ["d1-1-1", "d1-1-2", "d1-1-3"];
        let mut sum = 0.0;
        for id in children {
            let placed = layout[id];
            assert_eq!(placed.level, parent.level + 1);
            sum += placed.span.1 - placed.span.0;
        }
        let parent_width = parent.span.1 - parent.span.0;
        assert!((sum - parent_width).abs() < TOLERANCE);
    }

    #[test]
    fn collapsed_branches_weigh_one_leaf_each() {
        let tree = sample_tree();
        let expanded = ExpansionSet::with_root("root");
        // Six collapsed processes, one leaf apiece.
        assert_eq!(count_visible_leaves(&tree, &expanded), 6);

        let layout = radial_layout(&tree, &expanded);
        let p1 = layout["p1"];
        let width = p1.span.1 - p1.span.0;
        assert!((width - (2.0 * PI / 6.0)).abs() < TOLERANCE);
    }

    #[test]
    fn deep_levels_clamp_to_the_last_radius_entry() {
        // Chain deeper than the radius table.
        let mut node = leaf("n9");
        for depth in (1..9).rev() {
            node = HierarchyNode {
                id: format!("n{depth}"),
                label: String::new(),
                value: 0.0,
                variance: 0.0,
                kind: NodeKind::Process,
                relation: None,
                children: vec![node],
            };
        }
        let tree = HierarchyNode {
            id: "n0".into(),
            label: String::new(),
            value: 0.0,
            variance: 0.0,
            kind: NodeKind::Root,
            relation: None,
            children: vec![node],
        };

        let mut expanded = ExpansionSet::with_root("n0");
        expanded.expand_all(&tree);
        let layout = radial_layout(&tree, &expanded);
        let last = *LEVEL_RADII.last().expect("non-empty table");
        assert!((layout["n9"].pos.length() - last).abs() < TOLERANCE);
        assert!((layout["n8"].pos.length() - last).abs() < TOLERANCE);
    }
}
