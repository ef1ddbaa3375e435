//! Typed, validated configuration steps for browser-side ML pipelines,
//! assembled into dependency graphs and packaged as `.air` archives.

pub mod compiler;
pub mod error;
pub mod graph;
pub mod model;
pub mod steps;
pub mod validate;

pub use error::{Error, Result};
pub use graph::builder::ConfigBuilder;
pub use graph::{ConfigNode, Dependencies, GraphConfiguration, GraphDocument, NodeId, Stage};
pub use model::ModelConfiguration;
pub use steps::{Step, StepDict};
