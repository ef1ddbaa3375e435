use crate::error::Result;
use crate::graph::{GraphConfiguration, Metadata, Stage};
use crate::model::ModelConfiguration;
use crate::validate;

/// Chained construction of configuration metadata. Validation runs once, in
/// `build`/`build_model`.
pub struct ConfigBuilder {
    metadata: Metadata,
}

impl ConfigBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            metadata: Metadata {
                name: name.to_string(),
                stage: Stage::default(),
                version: None,
                description: None,
                mlflow_uri: None,
                mlflow_user: None,
                mlflow_token: None,
                owner: None,
                url: None,
                auto_run: false,
            },
        }
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.metadata.stage = stage;
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.metadata.version = Some(version.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.metadata.description = Some(description.to_string());
        self
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.metadata.owner = Some(owner.to_string());
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.metadata.url = Some(url.to_string());
        self
    }

    /// MLflow tracking server the model is registered in.
    pub fn mlflow(mut self, uri: &str, user: Option<&str>, token: Option<&str>) -> Self {
        self.metadata.mlflow_uri = Some(uri.to_string());
        self.metadata.mlflow_user = user.map(str::to_string);
        self.metadata.mlflow_token = token.map(str::to_string);
        self
    }

    pub fn auto_run(mut self, auto_run: bool) -> Self {
        self.metadata.auto_run = auto_run;
        self
    }

    fn finish(self) -> Result<Metadata> {
        validate::non_empty("name", &self.metadata.name)?;
        Ok(self.metadata)
    }

    pub fn build(self) -> Result<GraphConfiguration> {
        Ok(GraphConfiguration::from_metadata(self.finish()?))
    }

    pub fn build_model(self) -> Result<ModelConfiguration> {
        Ok(ModelConfiguration::from_metadata(self.finish()?))
    }
}
