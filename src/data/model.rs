use std::collections::{HashMap, HashSet, VecDeque};

use serde::Deserialize;

/// Closed set of node categories. The category drives base render size,
/// font sizes, and the per-level legend label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Process,
    Element,
    Driver,
    Detail,
    SubDetail,
    Micro,
    Action,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Root,
        NodeKind::Process,
        NodeKind::Element,
        NodeKind::Driver,
        NodeKind::Detail,
        NodeKind::SubDetail,
        NodeKind::Micro,
        NodeKind::Action,
    ];

    pub fn base_size(self) -> f32 {
        match self {
            Self::Root => 82.0,
            Self::Process => 68.0,
            Self::Element => 58.0,
            Self::Driver => 48.0,
            Self::Detail => 40.0,
            Self::SubDetail => 34.0,
            Self::Micro => 28.0,
            Self::Action => 24.0,
        }
    }

    pub fn label_font(self) -> f32 {
        match self {
            Self::Root => 14.0,
            Self::Process => 13.0,
            Self::Element => 12.0,
            Self::Driver => 11.0,
            Self::Detail | Self::SubDetail => 10.0,
            Self::Micro | Self::Action => 9.0,
        }
    }

    pub fn value_font(self) -> f32 {
        match self {
            Self::Root => 16.0,
            Self::Process => 14.0,
            Self::Element => 13.0,
            Self::Driver => 12.0,
            Self::Detail => 11.0,
            Self::SubDetail => 10.0,
            Self::Micro => 9.0,
            Self::Action => 8.0,
        }
    }

    pub fn level_label(self) -> &'static str {
        match self {
            Self::Root => "제품",
            Self::Process => "공정",
            Self::Element => "원가요소",
            Self::Driver => "드라이버",
            Self::Detail => "상세원인",
            Self::SubDetail => "세부요인",
            Self::Micro => "미시요인",
            Self::Action => "대응방안",
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Process => "process",
            Self::Element => "element",
            Self::Driver => "driver",
            Self::Detail => "detail",
            Self::SubDetail => "sub_detail",
            Self::Micro => "micro",
            Self::Action => "action",
        }
    }

    /// Depth-indexed fallback used when a wire type string is unknown.
    pub fn from_level(level: usize) -> NodeKind {
        *Self::ALL.get(level).unwrap_or(&NodeKind::Action)
    }

    /// Maps the backend graph endpoint's free-form type strings onto the
    /// closed enum. Unknown strings degrade to the depth fallback.
    pub fn from_wire(kind: &str, level: usize) -> NodeKind {
        match kind {
            "root" | "product" => Self::Root,
            "process" => Self::Process,
            "element" | "cost_element" => Self::Element,
            "driver" | "sub_var" => Self::Driver,
            "detail" => Self::Detail,
            "sub_detail" | "spread" => Self::SubDetail,
            "micro" | "event" => Self::Micro,
            "action" => Self::Action,
            _ => Self::from_level(level),
        }
    }
}

/// One entity in the causal/cost tree. Immutable once constructed; a
/// data refresh replaces the whole tree.
#[derive(Clone, Debug, Deserialize)]
pub struct HierarchyNode {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub variance: f64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(rename = "relationType", default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(HierarchyNode::node_count)
            .sum::<usize>()
    }

    pub fn collect_ids<'a>(&'a self, out: &mut HashSet<&'a str>) {
        out.insert(self.id.as_str());
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}

pub fn relation_label(code: &str) -> &str {
    match code {
        "CONSUMES" => "투입",
        "MATERIAL" => "재료비",
        "DEPRECIATION" => "감가상각",
        "LABOR" => "인건비",
        "CAUSED_BY" => "원인",
        "ROOT_CAUSE" => "근본원인",
        "FACTOR" => "요인",
        "IMPACT" => "영향",
        "ACTION" => "대응",
        "SUPPLY" => "공급",
        "PRICE" => "단가",
        "DEMAND" => "수요",
        "RISK" => "리스크",
        "CONVERT" => "전환",
        other => other,
    }
}

/// Flat wire form served by `GET /dashboard/graph-data`.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub sublabel: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub val: f64,
    #[serde(default)]
    pub level: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CausalGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl CausalGraph {
    pub fn index_by_id(&self) -> HashMap<&str, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.as_str(), index))
            .collect()
    }

    /// The unique level-0 node, if the payload carries one.
    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.level == 0)
    }

    /// Drops links with unresolved endpoints, self-links, and links that
    /// would introduce a cycle into the accepted adjacency. Links are
    /// considered in payload order; the first parent of a node wins for
    /// ancestry purposes.
    pub fn sanitized_links(&self) -> Vec<&GraphLink> {
        let known = self.index_by_id();
        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut accepted = Vec::with_capacity(self.links.len());

        for link in &self.links {
            let source = link.source.as_str();
            let target = link.target.as_str();
            if source == target || !known.contains_key(source) || !known.contains_key(target) {
                continue;
            }
            if reaches(&children, target, source) {
                continue;
            }

            children.entry(source).or_default().push(target);
            accepted.push(link);
        }

        accepted
    }

    /// Parent -> ordered children adjacency over the sanitized links,
    /// with the link label attached to each child edge.
    pub fn adjacency(&self) -> HashMap<&str, Vec<(&str, Option<&str>)>> {
        let mut adjacency: HashMap<&str, Vec<(&str, Option<&str>)>> = HashMap::new();
        for link in self.sanitized_links() {
            adjacency
                .entry(link.source.as_str())
                .or_default()
                .push((link.target.as_str(), link.label.as_deref()));
        }
        adjacency
    }

    /// Nests the flat graph into an owned hierarchy, starting from the
    /// level-0 root. A node is attached under its first encountered
    /// parent; absent a root the conversion yields nothing.
    pub fn to_tree(&self) -> Option<HierarchyNode> {
        let root = self.root()?;
        let by_id: HashMap<&str, &GraphNode> = self
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();
        let adjacency = self.adjacency();

        let mut attached: HashSet<String> = HashSet::new();
        attached.insert(root.id.clone());
        Some(build_subtree(
            root,
            None,
            0,
            &by_id,
            &adjacency,
            &mut attached,
        ))
    }
}

fn reaches(children: &HashMap<&str, Vec<&str>>, from: &str, to: &str) -> bool {
    if from == to {
        return true;
    }
    let mut queue = VecDeque::from([from]);
    let mut seen = HashSet::from([from]);
    while let Some(current) = queue.pop_front() {
        for &next in children.get(current).into_iter().flatten() {
            if next == to {
                return true;
            }
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

fn build_subtree(
    node: &GraphNode,
    relation: Option<&str>,
    depth: usize,
    by_id: &HashMap<&str, &GraphNode>,
    adjacency: &HashMap<&str, Vec<(&str, Option<&str>)>>,
    attached: &mut HashSet<String>,
) -> HierarchyNode {
    let mut children = Vec::new();
    for &(child_id, label) in adjacency.get(node.id.as_str()).into_iter().flatten() {
        if !attached.insert(child_id.to_string()) {
            continue;
        }
        if let Some(child) = by_id.get(child_id) {
            children.push(build_subtree(
                child,
                label,
                depth + 1,
                by_id,
                adjacency,
                attached,
            ));
        }
    }

    HierarchyNode {
        id: node.id.clone(),
        label: node.label.clone(),
        value: node.val.abs(),
        variance: node.val,
        kind: NodeKind::from_wire(&node.kind, depth),
        relation: relation.map(str::to_owned),
        children,
    }
}

/// Flattens an owned hierarchy into the wire form so one dataset can
/// feed both views.
pub fn flatten_tree(root: &HierarchyNode) -> CausalGraph {
    let mut graph = CausalGraph::default();
    flatten_into(root, 0, &mut graph);
    graph
}

fn flatten_into(node: &HierarchyNode, level: u32, graph: &mut CausalGraph) {
    graph.nodes.push(GraphNode {
        id: node.id.clone(),
        label: node.label.clone(),
        sublabel: None,
        kind: node.kind.wire_name().to_owned(),
        val: node.variance,
        level,
    });

    for child in &node.children {
        graph.links.push(GraphLink {
            source: node.id.clone(),
            target: child.id.clone(),
            label: child
                .relation
                .as_deref()
                .map(|code| relation_label(code).to_owned()),
        });
        flatten_into(child, level + 1, graph);
    }
}
