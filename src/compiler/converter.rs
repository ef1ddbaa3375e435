use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;
use tracing::info;

/// File extensions of Keras model containers that are converted to a
/// browser-loadable model instead of being copied.
pub const CONVERTIBLE_EXTENSIONS: [&str; 2] = ["h5", "keras"];

pub fn is_convertible(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CONVERTIBLE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Weight quantization applied during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizationDtype {
    Float16,
    Uint8,
    Uint16,
}

impl QuantizationDtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantizationDtype::Float16 => "float16",
            QuantizationDtype::Uint8 => "uint8",
            QuantizationDtype::Uint16 => "uint16",
        }
    }
}

impl FromStr for QuantizationDtype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "float16" => Ok(QuantizationDtype::Float16),
            "uint8" => Ok(QuantizationDtype::Uint8),
            "uint16" => Ok(QuantizationDtype::Uint16),
            other => Err(Error::validation(
                "dtype",
                format!("'{}' is not one of: float16, uint8, uint16", other),
            )),
        }
    }
}

impl fmt::Display for QuantizationDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a trained model file into a web-deployable model directory.
///
/// `dest_dir` already exists when `convert` is called.
pub trait ModelConverter {
    fn convert(&self, source: &Path, dest_dir: &Path, dtype: Option<QuantizationDtype>) -> Result<()>;
}

/// Runs the `tensorflowjs_converter` program.
#[derive(Debug, Clone)]
pub struct TfjsConverter {
    program: String,
}

impl TfjsConverter {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Default for TfjsConverter {
    fn default() -> Self {
        Self::new("tensorflowjs_converter")
    }
}

impl ModelConverter for TfjsConverter {
    fn convert(&self, source: &Path, dest_dir: &Path, dtype: Option<QuantizationDtype>) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--input_format").arg("keras");
        if let Some(dtype) = dtype {
            cmd.arg(format!("--quantize_{}", dtype));
        }
        cmd.arg(source).arg(dest_dir);

        info!("Converting {} -> {}", source.display(), dest_dir.display());
        let output = cmd
            .output()
            .map_err(|e| Error::Conversion(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Conversion(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
