use anyhow::{Context as AnyhowContext, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::graph::builder::ConfigBuilder;
use crate::graph::{Dependencies, GraphConfiguration, Stage};
use crate::steps::StepDict;

/// Graph definition file: metadata plus an ordered node list. Node ids are
/// the list positions.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphDefinition {
    pub name: String,
    #[serde(default)]
    pub stage: Stage,
    pub version: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub url: Option<String>,
    pub mlflow_uri: Option<String>,
    pub mlflow_user: Option<String>,
    pub mlflow_token: Option<String>,
    #[serde(default)]
    pub auto_run: bool,
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NodeDefinition {
    pub step: StepDict,
    #[serde(default)]
    pub dependencies: Option<Dependencies>,
}

impl GraphDefinition {
    pub fn into_graph(self) -> crate::Result<GraphConfiguration> {
        let mut builder = ConfigBuilder::new(&self.name)
            .stage(self.stage)
            .auto_run(self.auto_run);
        if let Some(v) = &self.version {
            builder = builder.version(v);
        }
        if let Some(d) = &self.description {
            builder = builder.description(d);
        }
        if let Some(o) = &self.owner {
            builder = builder.owner(o);
        }
        if let Some(u) = &self.url {
            builder = builder.url(u);
        }
        if let Some(uri) = &self.mlflow_uri {
            builder = builder.mlflow(uri, self.mlflow_user.as_deref(), self.mlflow_token.as_deref());
        }

        let mut graph = builder.build()?;
        for node in self.nodes {
            graph.add_node(&node.step, node.dependencies)?;
        }
        Ok(graph)
    }
}

/// Loads a graph definition from YAML (JSON files parse too).
pub fn load_graph(file_path: &Path) -> Result<GraphConfiguration> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read graph definition from {}", file_path.display()))?;

    let definition: GraphDefinition = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to deserialize graph definition from {}", file_path.display()))?;

    let graph = definition
        .into_graph()
        .with_context(|| format!("Invalid graph definition in {}", file_path.display()))?;
    info!("Loaded graph '{}' with {} nodes", graph.name(), graph.nodes().len());
    Ok(graph)
}
