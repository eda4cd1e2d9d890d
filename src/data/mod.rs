mod fetch;
mod model;
mod sample;
mod source;

pub use model::{
    CausalGraph, GraphLink, GraphNode, HierarchyNode, NodeKind, flatten_tree, relation_label,
};
pub use sample::{PRODUCT_CATALOG, REPORT_MONTHS, sample_tree};
pub use source::{DataSource, HttpSource, SampleSource, SourceData};
