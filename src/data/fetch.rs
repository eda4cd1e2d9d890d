//! Blocking HTTP client for the analysis backend. Every call blocks on
//! the network, so callers must run it on a background thread.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use super::model::CausalGraph;

const TIMEOUT_SECS: u64 = 30;

pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// `GET /dashboard/graph-data?yyyymm=..&product_cd=..`
    pub fn graph_data(&self, yyyymm: &str, product_cd: &str) -> Result<CausalGraph> {
        let url = format!("{}/dashboard/graph-data", self.base_url);
        let response = self
            .agent
            .get(&url)
            .query("yyyymm", yyyymm)
            .query("product_cd", product_cd)
            .call();

        let body = match response {
            Ok(response) => response
                .into_string()
                .context("graph-data response was not valid UTF-8")?,
            Err(ureq::Error::Status(code, _)) => {
                return Err(anyhow!(
                    "backend returned HTTP {code} for {yyyymm}/{product_cd}"
                ));
            }
            Err(ureq::Error::Transport(error)) => {
                return Err(anyhow!("could not reach backend: {error}"));
            }
        };

        serde_json::from_str(&body).context("invalid graph-data JSON from backend")
    }
}
