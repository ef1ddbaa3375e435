use crate::error::Result;
use crate::steps::Step;
use crate::validate;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// A user-defined object (e.g. a JS snippet) whose file is bundled with the
/// configuration and loaded by name at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomObject {
    class_name: String,
    path: PathBuf,
}

impl CustomObject {
    pub fn new(class_name: &str, path: impl AsRef<Path>) -> Result<Self> {
        validate::non_empty("class_name", class_name)?;
        let path = path.as_ref();
        validate::non_empty("path", &path.to_string_lossy())?;
        Ok(Self {
            class_name: class_name.to_string(),
            path: path.to_path_buf(),
        })
    }
}

impl Step for CustomObject {
    fn class_name(&self) -> &str {
        "CustomObject"
    }

    fn params(&self) -> Value {
        json!({
            "className": self.class_name,
            "path": self.path.to_string_lossy(),
        })
    }
}
