use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

pub mod analytic;
pub mod feedback;
pub mod harvesting;
pub mod other;
pub mod postprocessing;
pub mod preprocessing;
pub mod rendering;

/// Serialized form of a step: `{ "className": ..., "params": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepDict {
    #[serde(rename = "className")]
    pub class_name: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl StepDict {
    /// Fails unless `params` is a JSON object.
    pub fn new(class_name: &str, params: Value) -> Result<Self> {
        match params {
            Value::Object(params) => Ok(Self {
                class_name: class_name.to_string(),
                params,
            }),
            other => Err(Error::validation(
                "params",
                format!("must be a mapping, got {}", other),
            )),
        }
    }

    /// The `path` parameter, if the step carries one.
    pub fn path(&self) -> Option<&str> {
        self.params.get("path").and_then(|v| v.as_str())
    }
}

/// Every configuration step (harvester, preprocessor, analytic, ...) implements
/// this. Built-in steps are validated on construction; `to_dict` only fails
/// when `params` does not return an object.
pub trait Step: Debug {
    fn class_name(&self) -> &str;
    fn params(&self) -> Value;

    fn to_dict(&self) -> Result<StepDict> {
        StepDict::new(self.class_name(), self.params())
    }
}

impl Step for StepDict {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn params(&self) -> Value {
        Value::Object(self.params.clone())
    }

    fn to_dict(&self) -> Result<StepDict> {
        Ok(self.clone())
    }
}

/// Step class names whose `params.path` points at a local file to be packaged.
pub const FILE_BEARING_CLASSES: [&str; 3] = ["LocalModel", "LocalAnalytic", "CustomObject"];

pub fn is_file_bearing(class_name: &str) -> bool {
    FILE_BEARING_CLASSES.contains(&class_name)
}
