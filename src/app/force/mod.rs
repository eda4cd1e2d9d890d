//! Force-directed causal view: level-gated visibility over the flat
//! graph plus a relaxation layout. Unlike the radial view this one
//! works on the wire-form graph directly, so cross-branch links the
//! tree nesting dropped still show up.

mod sim;
mod view;

use std::collections::{HashMap, HashSet, VecDeque};

use eframe::egui::Vec2;

use crate::data::CausalGraph;

pub(in crate::app) use sim::relax_layout;

/// One node admitted into the current force view. `index` points into
/// `CausalGraph::nodes`; `hidden_children` is how many outgoing links
/// the visibility gate is still holding back.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct VisibleNode {
    pub index: usize,
    pub hidden_children: usize,
}

pub(in crate::app) struct VisibleGraph {
    pub nodes: Vec<VisibleNode>,
    /// Endpoints index into `nodes`, with the relation label carried over.
    pub edges: Vec<(usize, usize, Option<String>)>,
}

/// Expansion and layout memory for the force view. Visibility combines
/// a per-node expansion set with a level ceiling that only ever rises
/// on expansion, so ordinary clicks and expand-all share one filter.
/// Positions persist across visibility changes so expanding a node
/// does not reshuffle everything already on screen.
pub(in crate::app) struct ForceState {
    expanded: HashSet<String>,
    max_level: u32,
    pub positions: HashMap<String, Vec2>,
    revision: u64,
}

impl ForceState {
    pub fn new() -> Self {
        Self {
            expanded: HashSet::new(),
            max_level: 1,
            positions: HashMap::new(),
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// A node's children become visible once the node is explicitly
    /// expanded, or while it sits above the level horizon.
    fn children_unlocked(&self, id: &str, level: u32) -> bool {
        self.expanded.contains(id) || level < self.max_level.saturating_sub(1)
    }

    /// Toggles a node. Expanding raises the level horizon so the newly
    /// revealed children clear the gate; collapsing never lowers it.
    /// Returns true if the node is expanded afterwards.
    pub fn click(&mut self, id: &str, level: u32) -> bool {
        self.revision = self.revision.wrapping_add(1);
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_owned());
            self.max_level = self.max_level.max(level + 2);
            true
        }
    }

    pub fn expand_all(&mut self, graph: &CausalGraph) {
        self.revision = self.revision.wrapping_add(1);
        self.max_level = u32::MAX;
        for node in &graph.nodes {
            self.expanded.insert(node.id.clone());
        }
    }

    pub fn collapse_all(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.expanded.clear();
        self.max_level = 1;
    }

    /// BFS from the level-0 root over the sanitized adjacency. A child
    /// is admitted when its parent is unlocked and it sits within the
    /// level ceiling. Edges then connect every admitted pair, so cross
    /// links between visible branches survive even when their source
    /// node is not the one that unlocked the target; links to held-back
    /// nodes are tallied per parent so the view can badge them.
    pub fn visible_subgraph(&self, graph: &CausalGraph) -> VisibleGraph {
        let mut out = VisibleGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let Some(root) = graph.root() else {
            return out;
        };

        let index_by_id = graph.index_by_id();
        let adjacency = graph.adjacency();

        let mut slot_by_id: HashMap<&str, usize> = HashMap::new();
        let mut queue = VecDeque::new();

        slot_by_id.insert(root.id.as_str(), out.nodes.len());
        out.nodes.push(VisibleNode {
            index: index_by_id[root.id.as_str()],
            hidden_children: 0,
        });
        queue.push_back(root.id.as_str());

        while let Some(current) = queue.pop_front() {
            let current_slot = slot_by_id[current];
            let current_level = graph.nodes[out.nodes[current_slot].index].level;
            if !self.children_unlocked(current, current_level) {
                continue;
            }

            for &(child_id, _) in adjacency.get(current).into_iter().flatten() {
                let child_index = index_by_id[child_id];
                if graph.nodes[child_index].level > self.max_level
                    || slot_by_id.contains_key(child_id)
                {
                    continue;
                }
                slot_by_id.insert(child_id, out.nodes.len());
                out.nodes.push(VisibleNode {
                    index: child_index,
                    hidden_children: 0,
                });
                queue.push_back(child_id);
            }
        }

        for slot in 0..out.nodes.len() {
            let id = graph.nodes[out.nodes[slot].index].id.as_str();
            for &(child_id, label) in adjacency.get(id).into_iter().flatten() {
                match slot_by_id.get(child_id) {
                    Some(&child_slot) => {
                        out.edges.push((slot, child_slot, label.map(str::to_owned)));
                    }
                    None => out.nodes[slot].hidden_children += 1,
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{HierarchyNode, NodeKind, flatten_tree, sample_tree};

    fn sample_graph() -> CausalGraph {
        flatten_tree(&sample_tree())
    }

    fn visible_ids<'a>(graph: &'a CausalGraph, visible: &VisibleGraph) -> Vec<&'a str> {
        visible
            .nodes
            .iter()
            .map(|node| graph.nodes[node.index].id.as_str())
            .collect()
    }

    #[test]
    fn initial_view_shows_only_the_root() {
        let graph = sample_graph();
        let state = ForceState::new();
        let visible = state.visible_subgraph(&graph);

        assert_eq!(visible_ids(&graph, &visible), ["root"]);
        assert!(visible.edges.is_empty());
        // All 6 process links are held back behind the root.
        assert_eq!(visible.nodes[0].hidden_children, 6);
    }

    #[test]
    fn clicking_the_root_reveals_the_process_ring() {
        let graph = sample_graph();
        let mut state = ForceState::new();
        assert!(state.click("root", 0));

        let visible = state.visible_subgraph(&graph);
        assert_eq!(visible.nodes.len(), 7);
        assert_eq!(visible.edges.len(), 6);
        let p1 = visible
            .nodes
            .iter()
            .find(|node| graph.nodes[node.index].id == "p1")
            .expect("p1 visible");
        assert!(p1.hidden_children > 0);
    }

    #[test]
    fn expanding_one_process_lifts_the_whole_level_horizon() {
        let graph = sample_graph();
        let mut state = ForceState::new();
        state.click("root", 0);
        state.click("p1", 1);

        // Raising the ceiling to 3 unlocks every level-1 node, so the
        // siblings' children come in through the shared filter too.
        let visible = state.visible_subgraph(&graph);
        let p2 = visible
            .nodes
            .iter()
            .find(|node| graph.nodes[node.index].id == "p2")
            .expect("p2 visible");
        assert_eq!(p2.hidden_children, 0);
        let max_level = visible
            .nodes
            .iter()
            .map(|node| graph.nodes[node.index].level)
            .max()
            .unwrap_or(0);
        assert_eq!(max_level, 2);
    }

    #[test]
    fn collapse_all_restores_the_initial_view() {
        let graph = sample_graph();
        let mut state = ForceState::new();
        state.click("root", 0);
        state.click("p1", 1);
        state.click("e1-1", 2);

        state.collapse_all();
        let visible = state.visible_subgraph(&graph);
        assert_eq!(visible_ids(&graph, &visible), ["root"]);
    }

    #[test]
    fn expand_all_admits_every_node_and_link() {
        let graph = sample_graph();
        let mut state = ForceState::new();
        state.expand_all(&graph);

        let visible = state.visible_subgraph(&graph);
        assert_eq!(visible.nodes.len(), graph.nodes.len());
        assert_eq!(visible.edges.len(), graph.links.len());
        assert!(visible.nodes.iter().all(|node| node.hidden_children == 0));
    }

    #[test]
    fn leaf_click_raises_the_ceiling_for_sibling_branches() {
        fn leaf(id: &str, kind: NodeKind) -> HierarchyNode {
            HierarchyNode {
                id: id.into(),
                label: id.into(),
                value: 0.0,
                variance: 0.0,
                kind,
                relation: None,
                children: Vec::new(),
            }
        }

        let mut tree = leaf("root", NodeKind::Root);
        tree.children.push(leaf("a", NodeKind::Process));
        let mut b = leaf("b", NodeKind::Process);
        b.children.push(leaf("b1", NodeKind::Element));
        tree.children.push(b);

        let graph = flatten_tree(&tree);
        let mut state = ForceState::new();
        state.click("root", 0);
        // "a" has no children, but its click still lifts the ceiling to
        // 3, which unlocks "b" and reveals "b1".
        state.click("a", 1);

        let visible = state.visible_subgraph(&graph);
        assert!(visible_ids(&graph, &visible).contains(&"b1"));
    }

    #[test]
    fn collapsing_never_lowers_the_ceiling() {
        let graph = sample_graph();
        let mut state = ForceState::new();
        state.click("root", 0);
        state.click("p1", 1);

        // Un-clicking p1 removes it from the set, but level-1 nodes stay
        // unlocked by the horizon the expansion raised.
        assert!(!state.click("p1", 1));
        let visible = state.visible_subgraph(&graph);
        let p1 = visible
            .nodes
            .iter()
            .find(|node| graph.nodes[node.index].id == "p1")
            .expect("p1 visible");
        assert_eq!(p1.hidden_children, 0);
    }
}
