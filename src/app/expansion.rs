use std::collections::HashSet;

use crate::data::HierarchyNode;

/// Set of node ids whose children are eligible to be shown. Owned by a
/// single view; every mutation bumps `revision` so derived layout
/// caches know to recompute.
#[derive(Clone, Debug)]
pub struct ExpansionSet {
    expanded: HashSet<String>,
    revision: u64,
}

impl ExpansionSet {
    pub fn with_root(root_id: &str) -> Self {
        Self {
            expanded: HashSet::from([root_id.to_owned()]),
            revision: 0,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    /// Expanding inserts only `id` itself; children stay collapsed until
    /// clicked individually. Collapsing cascades: every id in the static
    /// subtree below `id` is removed, so re-expanding starts clean.
    /// Returns true if `id` is expanded afterwards.
    pub fn toggle(&mut self, id: &str, tree: &HierarchyNode) -> bool {
        self.revision = self.revision.wrapping_add(1);
        if self.expanded.remove(id) {
            if let Some(node) = tree.find(id) {
                remove_subtree(&mut self.expanded, node);
            }
            false
        } else {
            self.expanded.insert(id.to_owned());
            true
        }
    }

    pub fn expand_all(&mut self, tree: &HierarchyNode) {
        self.revision = self.revision.wrapping_add(1);
        insert_parents(&mut self.expanded, tree);
    }

    pub fn reset_to_root(&mut self, root_id: &str) {
        self.revision = self.revision.wrapping_add(1);
        self.expanded.clear();
        self.expanded.insert(root_id.to_owned());
    }
}

fn remove_subtree(expanded: &mut HashSet<String>, node: &HierarchyNode) {
    for child in &node.children {
        expanded.remove(&child.id);
        remove_subtree(expanded, child);
    }
}

fn insert_parents(expanded: &mut HashSet<String>, node: &HierarchyNode) {
    if node.has_children() {
        expanded.insert(node.id.clone());
        for child in &node.children {
            insert_parents(expanded, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_tree;

    #[test]
    fn toggle_expand_inserts_only_the_id() {
        let tree = sample_tree();
        let mut set = ExpansionSet::with_root("root");
        assert!(set.toggle("p1", &tree));
        assert!(set.contains("p1"));
        assert!(!set.contains("e1-1"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn collapse_cascades_through_the_static_subtree() {
        let tree = sample_tree();
        let mut set = ExpansionSet::with_root("root");
        set.toggle("p1", &tree);
        set.toggle("e1-1", &tree);
        set.toggle("d1-1-1", &tree);

        // Collapsing p1 must strip every descendant, expanded or not.
        assert!(!set.toggle("p1", &tree));
        assert!(!set.contains("p1"));
        assert!(!set.contains("e1-1"));
        assert!(!set.contains("d1-1-1"));
        assert!(set.contains("root"));
    }

    #[test]
    fn expand_collapse_round_trip_restores_the_set() {
        let tree = sample_tree();
        let mut set = ExpansionSet::with_root("root");
        set.toggle("p1", &tree);

        let before: std::collections::BTreeSet<String> =
            set.ids().map(str::to_owned).collect();
        set.toggle("e1-1", &tree);
        set.toggle("e1-1", &tree);
        let after: std::collections::BTreeSet<String> =
            set.ids().map(str::to_owned).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn expand_all_marks_every_parent_but_no_leaf() {
        let tree = sample_tree();
        let mut set = ExpansionSet::with_root("root");
        set.expand_all(&tree);
        assert!(set.contains("d1-1-1"));
        // Leaves gain nothing from membership.
        assert!(!set.contains("ac1-1-1-1-1-1-1"));
    }

    #[test]
    fn reset_returns_to_root_only() {
        let tree = sample_tree();
        let mut set = ExpansionSet::with_root("root");
        set.expand_all(&tree);
        set.reset_to_root("root");
        assert_eq!(set.len(), 1);
        assert!(set.contains("root"));
    }
}
