pub mod builder;

use crate::compiler::converter::{ModelConverter, QuantizationDtype, TfjsConverter};
use crate::compiler::packager;
use crate::error::{Error, Result};
use crate::steps::{Step, StepDict, is_file_bearing};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub type NodeId = usize;

/// Ids of the nodes that must run before a node: one id or a list of ids.
/// Serialized as a bare integer or an integer array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Dependencies {
    One(NodeId),
    Many(Vec<NodeId>),
}

impl From<NodeId> for Dependencies {
    fn from(id: NodeId) -> Self {
        Dependencies::One(id)
    }
}

impl From<Vec<NodeId>> for Dependencies {
    fn from(ids: Vec<NodeId>) -> Self {
        Dependencies::Many(ids)
    }
}

impl<const N: usize> From<[NodeId; N]> for Dependencies {
    fn from(ids: [NodeId; N]) -> Self {
        Dependencies::Many(ids.to_vec())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Experimental,
    Staging,
    Production,
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "experimental" => Ok(Stage::Experimental),
            "staging" => Ok(Stage::Staging),
            "production" => Ok(Stage::Production),
            other => Err(Error::validation(
                "stage",
                format!("'{}' is not one of: experimental, staging, production", other),
            )),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Experimental => "experimental",
            Stage::Staging => "staging",
            Stage::Production => "production",
        };
        f.write_str(s)
    }
}

/// Descriptive fields shared by graph and linear model configurations.
/// Copied into the output document as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    pub stage: Stage,
    pub version: Option<String>,
    pub description: Option<String>,
    pub mlflow_uri: Option<String>,
    pub mlflow_user: Option<String>,
    pub mlflow_token: Option<String>,
    pub owner: Option<String>,
    pub url: Option<String>,
    pub auto_run: bool,
}

impl Metadata {
    /// Default archive name: `<name>.air`.
    pub fn default_filename(&self) -> PathBuf {
        PathBuf::from(format!("{}.air", self.name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigNode {
    pub id: NodeId,
    pub dependencies: Option<Dependencies>,
    pub step: StepDict,
}

/// The serialized graph, as written to `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphDocument {
    #[serde(rename = "className")]
    pub class_name: String,
    pub params: Metadata,
    pub nodes: Vec<ConfigNode>,
}

/// An append-only list of configuration steps with declared dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfiguration {
    metadata: Metadata,
    nodes: Vec<ConfigNode>,
}

impl GraphConfiguration {
    pub(crate) fn from_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            nodes: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn nodes(&self) -> &[ConfigNode] {
        &self.nodes
    }

    /// Appends a step and returns its id, usable as a dependency of later nodes.
    ///
    /// Dependency ids are stored verbatim; they are not checked against the
    /// nodes of this graph. Fails, leaving the graph unchanged, when the step's
    /// params are not a mapping.
    pub fn add_node<S>(&mut self, step: &S, dependencies: Option<Dependencies>) -> Result<NodeId>
    where
        S: Step + ?Sized,
    {
        let id = self.nodes.len();
        let step = step.to_dict()?;
        debug!("Adding node {} ({})", id, step.class_name);
        self.nodes.push(ConfigNode {
            id,
            dependencies,
            step,
        });
        Ok(id)
    }

    /// Local paths of every file-bearing step, in node order.
    pub fn get_filenames(&self) -> Vec<PathBuf> {
        self.nodes
            .iter()
            .filter(|n| is_file_bearing(&n.step.class_name))
            .filter_map(|n| n.step.path().map(PathBuf::from))
            .collect()
    }

    pub fn to_dict(&self) -> GraphDocument {
        GraphDocument {
            class_name: "GraphConfiguration".to_string(),
            params: self.metadata.clone(),
            nodes: self.nodes.clone(),
        }
    }

    /// Packages the graph into an `.air` archive using the external
    /// `tensorflowjs_converter` for any Keras models.
    pub fn compile(
        &self,
        filename: Option<&Path>,
        dtype: Option<QuantizationDtype>,
    ) -> Result<PathBuf> {
        self.compile_with(filename, dtype, &TfjsConverter::default())
    }

    pub fn compile_with(
        &self,
        filename: Option<&Path>,
        dtype: Option<QuantizationDtype>,
        converter: &dyn ModelConverter,
    ) -> Result<PathBuf> {
        let filename = filename
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.metadata.default_filename());
        packager::package(
            &self.to_dict(),
            &self.get_filenames(),
            &filename,
            dtype,
            converter,
        )?;
        Ok(filename)
    }
}
