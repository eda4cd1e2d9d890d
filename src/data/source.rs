use anyhow::{Result, anyhow};

use super::fetch::ApiClient;
use super::model::{CausalGraph, HierarchyNode, flatten_tree};
use super::sample::sample_tree;

/// One (yyyymm, product) worth of data, in both shapes the views need.
pub struct SourceData {
    pub tree: HierarchyNode,
    pub graph: CausalGraph,
}

/// Where hierarchy data comes from. The app core only ever sees this
/// trait; which implementation backs it is wiring in `main`.
pub trait DataSource: Send + Sync {
    fn load(&self, yyyymm: &str, product_cd: &str) -> Result<SourceData>;
    fn describe(&self) -> String;
}

/// In-memory constant dataset; every month/product resolves to the same
/// sample drill-down with the product code substituted at the root.
pub struct SampleSource;

impl DataSource for SampleSource {
    fn load(&self, _yyyymm: &str, product_cd: &str) -> Result<SourceData> {
        let mut tree = sample_tree();
        tree.label = product_cd.to_owned();
        let graph = flatten_tree(&tree);
        Ok(SourceData { tree, graph })
    }

    fn describe(&self) -> String {
        "built-in sample data".to_owned()
    }
}

pub struct HttpSource {
    client: ApiClient,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: ApiClient::new(base_url.clone()),
            base_url,
        }
    }
}

impl DataSource for HttpSource {
    fn load(&self, yyyymm: &str, product_cd: &str) -> Result<SourceData> {
        let graph = self.client.graph_data(yyyymm, product_cd)?;
        let tree = graph.to_tree().ok_or_else(|| {
            anyhow!("graph-data payload for {yyyymm}/{product_cd} has no level-0 root node")
        })?;
        Ok(SourceData { tree, graph })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_source_substitutes_product_label() {
        let data = SampleSource
            .load("202501", "NAND_001")
            .expect("sample load");
        assert_eq!(data.tree.label, "NAND_001");
        assert_eq!(data.graph.nodes.len(), data.tree.node_count());
    }
}
