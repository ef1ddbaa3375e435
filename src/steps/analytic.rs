//! Analytics: the model or lookup the pipeline runs, either bundled into the
//! `.air` archive (`Local*`) or reached over HTTP (`Deployed*`).

use crate::error::Result;
use crate::steps::Step;
use crate::validate;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

const INPUT_TYPES: [&str; 3] = ["text", "cv", "tabular"];
const SECRET_LOCATIONS: [&str; 2] = ["request", "header"];

#[derive(Debug, Clone, PartialEq)]
struct LocalArtifact {
    path: PathBuf,
    input_type: String,
}

impl LocalArtifact {
    fn new(path: impl AsRef<Path>, input_type: &str) -> Result<Self> {
        let path = path.as_ref();
        validate::non_empty("path", &path.to_string_lossy())?;
        validate::one_of("input_type", input_type, &INPUT_TYPES)?;
        Ok(Self {
            path: path.to_path_buf(),
            input_type: input_type.to_string(),
        })
    }

    fn params(&self) -> Value {
        json!({
            "path": self.path.to_string_lossy(),
            "inputType": self.input_type,
        })
    }
}

/// A model file shipped inside the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalModel(LocalArtifact);

impl LocalModel {
    pub fn new(path: impl AsRef<Path>, input_type: &str) -> Result<Self> {
        LocalArtifact::new(path, input_type).map(Self)
    }

    pub fn path(&self) -> &Path {
        &self.0.path
    }
}

impl Step for LocalModel {
    fn class_name(&self) -> &str {
        "LocalModel"
    }

    fn params(&self) -> Value {
        self.0.params()
    }
}

/// A lookup table (JSON/CSV) shipped inside the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalAnalytic(LocalArtifact);

impl LocalAnalytic {
    pub fn new(path: impl AsRef<Path>, input_type: &str) -> Result<Self> {
        LocalArtifact::new(path, input_type).map(Self)
    }

    pub fn path(&self) -> &Path {
        &self.0.path
    }
}

impl Step for LocalAnalytic {
    fn class_name(&self) -> &str {
        "LocalAnalytic"
    }

    fn params(&self) -> Value {
        self.0.params()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RemoteEndpoint {
    url: String,
    input_type: String,
    secret: String,
    header: Option<String>,
}

impl RemoteEndpoint {
    fn new(url: &str, input_type: &str, secret: &str, header: Option<&str>) -> Result<Self> {
        validate::non_empty("url", url)?;
        validate::one_of("input_type", input_type, &INPUT_TYPES)?;
        validate::one_of("secret", secret, &SECRET_LOCATIONS)?;
        let header = header.map(str::to_string);
        if secret == "header" {
            validate::required_with("header", "secret is 'header'", header.as_ref())?;
        }
        Ok(Self {
            url: url.to_string(),
            input_type: input_type.to_string(),
            secret: secret.to_string(),
            header,
        })
    }

    fn params(&self) -> Value {
        json!({
            "url": self.url,
            "inputType": self.input_type,
            "secret": self.secret,
            "header": self.header,
        })
    }
}

/// A model served behind an HTTP endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployedModel(RemoteEndpoint);

impl DeployedModel {
    /// `secret` is where the runtime attaches the user's key: `request` or `header`.
    pub fn new(url: &str, input_type: &str, secret: &str, header: Option<&str>) -> Result<Self> {
        RemoteEndpoint::new(url, input_type, secret, header).map(Self)
    }
}

impl Step for DeployedModel {
    fn class_name(&self) -> &str {
        "DeployedModel"
    }

    fn params(&self) -> Value {
        self.0.params()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeployedAnalytic(RemoteEndpoint);

impl DeployedAnalytic {
    pub fn new(url: &str, input_type: &str, secret: &str, header: Option<&str>) -> Result<Self> {
        RemoteEndpoint::new(url, input_type, secret, header).map(Self)
    }
}

impl Step for DeployedAnalytic {
    fn class_name(&self) -> &str {
        "DeployedAnalytic"
    }

    fn params(&self) -> Value {
        self.0.params()
    }
}
