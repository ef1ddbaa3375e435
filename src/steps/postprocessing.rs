use crate::error::{Error, Result};
use crate::steps::Step;
use crate::validate;
use serde_json::{Value, json};

fn check_labels(labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(Error::validation("label_map", "must not be empty"));
    }
    for label in labels {
        validate::non_empty("label_map", label)?;
    }
    Ok(())
}

fn collect_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(Into::into).collect()
}

/// Thresholds a single sigmoid output into one of two labels.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryClassification {
    label_map: Vec<String>,
    threshold: f64,
}

impl BinaryClassification {
    pub fn new<I, S>(label_map: I, threshold: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label_map = collect_labels(label_map);
        check_labels(&label_map)?;
        if label_map.len() != 2 {
            return Err(Error::validation(
                "label_map",
                format!("expected 2 labels, got {}", label_map.len()),
            ));
        }
        validate::in_range("threshold", threshold, 0.0, 1.0)?;
        Ok(Self {
            label_map,
            threshold,
        })
    }
}

impl Step for BinaryClassification {
    fn class_name(&self) -> &str {
        "BinaryClassification"
    }

    fn params(&self) -> Value {
        json!({ "labelMap": self.label_map, "threshold": self.threshold })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MulticlassClassification {
    label_map: Vec<String>,
}

impl MulticlassClassification {
    pub fn new<I, S>(label_map: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label_map = collect_labels(label_map);
        check_labels(&label_map)?;
        Ok(Self { label_map })
    }
}

impl Step for MulticlassClassification {
    fn class_name(&self) -> &str {
        "MulticlassClassification"
    }

    fn params(&self) -> Value {
        json!({ "labelMap": self.label_map })
    }
}

/// Rescales a regression output from `[0, 1]` to `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    min: Option<f64>,
    max: Option<f64>,
    round: bool,
}

impl Regression {
    pub fn new(min: Option<f64>, max: Option<f64>, round: bool) -> Result<Self> {
        match (min, max) {
            (Some(lo), Some(hi)) => {
                validate::finite("min", lo)?;
                validate::finite("max", hi)?;
                if lo > hi {
                    return Err(Error::validation("max", format!("{} is less than min {}", hi, lo)));
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::validation("min", "min and max must be given together"));
            }
            (None, None) => {}
        }
        Ok(Self { min, max, round })
    }
}

impl Step for Regression {
    fn class_name(&self) -> &str {
        "Regression"
    }

    fn params(&self) -> Value {
        json!({ "min": self.min, "max": self.max, "round": self.round })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDetection {
    label_map: Vec<String>,
    threshold: f64,
}

impl ObjectDetection {
    pub fn new<I, S>(label_map: I, threshold: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label_map = collect_labels(label_map);
        check_labels(&label_map)?;
        validate::in_range("threshold", threshold, 0.0, 1.0)?;
        Ok(Self {
            label_map,
            threshold,
        })
    }
}

impl Step for ObjectDetection {
    fn class_name(&self) -> &str {
        "ObjectDetection"
    }

    fn params(&self) -> Value {
        json!({ "labelMap": self.label_map, "threshold": self.threshold })
    }
}
