//! Linear model configuration: one list of steps per pipeline stage instead of
//! an explicit dependency graph.

use crate::compiler::converter::{ModelConverter, QuantizationDtype, TfjsConverter};
use crate::compiler::packager;
use crate::error::Result;
use crate::graph::Metadata;
use crate::steps::{Step, StepDict, is_file_bearing};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelParams {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub harvesting_steps: Vec<StepDict>,
    pub preprocessing_steps: Vec<StepDict>,
    pub analytic: Vec<StepDict>,
    pub postprocessing_steps: Vec<StepDict>,
    pub rendering_steps: Vec<StepDict>,
    pub feedback_steps: Vec<StepDict>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDocument {
    #[serde(rename = "className")]
    pub class_name: String,
    pub params: ModelParams,
}

/// Steps are serialized as they are added, so each stage method fails on a
/// step whose params are not a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfiguration {
    metadata: Metadata,
    harvesting: Vec<StepDict>,
    preprocessing: Vec<StepDict>,
    analytic: Vec<StepDict>,
    postprocessing: Vec<StepDict>,
    rendering: Vec<StepDict>,
    feedback: Vec<StepDict>,
}

impl ModelConfiguration {
    pub(crate) fn from_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            harvesting: Vec::new(),
            preprocessing: Vec::new(),
            analytic: Vec::new(),
            postprocessing: Vec::new(),
            rendering: Vec::new(),
            feedback: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn harvester(mut self, step: impl Step) -> Result<Self> {
        self.harvesting.push(step.to_dict()?);
        Ok(self)
    }

    pub fn preprocessor(mut self, step: impl Step) -> Result<Self> {
        self.preprocessing.push(step.to_dict()?);
        Ok(self)
    }

    pub fn analytic(mut self, step: impl Step) -> Result<Self> {
        self.analytic.push(step.to_dict()?);
        Ok(self)
    }

    pub fn postprocessor(mut self, step: impl Step) -> Result<Self> {
        self.postprocessing.push(step.to_dict()?);
        Ok(self)
    }

    pub fn renderer(mut self, step: impl Step) -> Result<Self> {
        self.rendering.push(step.to_dict()?);
        Ok(self)
    }

    pub fn feedback(mut self, step: impl Step) -> Result<Self> {
        self.feedback.push(step.to_dict()?);
        Ok(self)
    }

    /// Local paths referenced by the analytic steps, in order.
    pub fn get_filenames(&self) -> Vec<PathBuf> {
        self.analytic
            .iter()
            .filter(|d| is_file_bearing(&d.class_name))
            .filter_map(|d| d.path().map(PathBuf::from))
            .collect()
    }

    pub fn to_dict(&self) -> ModelDocument {
        ModelDocument {
            class_name: "ModelConfiguration".to_string(),
            params: ModelParams {
                metadata: self.metadata.clone(),
                harvesting_steps: self.harvesting.clone(),
                preprocessing_steps: self.preprocessing.clone(),
                analytic: self.analytic.clone(),
                postprocessing_steps: self.postprocessing.clone(),
                rendering_steps: self.rendering.clone(),
                feedback_steps: self.feedback.clone(),
            },
        }
    }

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
