use crate::error::{Error, Result};
use crate::steps::Step;
use crate::validate;
use serde_json::{Value, json};

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

fn check_list(field: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    items.iter().try_for_each(|item| validate::non_empty(field, item))
}

/// Thumbs up / thumbs down on each prediction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimpleFeedback;

impl Step for SimpleFeedback {
    fn class_name(&self) -> &str {
        "SimpleFeedback"
    }

    fn params(&self) -> Value {
        json!({})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryFeedback {
    labels: Vec<String>,
}

impl BinaryFeedback {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = owned(labels);
        check_list("labels", &labels)?;
        if labels.len() != 2 {
            return Err(Error::validation(
                "labels",
                format!("expected 2 labels, got {}", labels.len()),
            ));
        }
        Ok(Self { labels })
    }
}

impl Step for BinaryFeedback {
    fn class_name(&self) -> &str {
        "BinaryFeedback"
    }

    fn params(&self) -> Value {
        json!({ "labels": self.labels })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MulticlassFeedback {
    labels: Vec<String>,
}

impl MulticlassFeedback {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = owned(labels);
        check_list("labels", &labels)?;
        Ok(Self { labels })
    }
}

impl Step for MulticlassFeedback {
    fn class_name(&self) -> &str {
        "MulticlassFeedback"
    }

    fn params(&self) -> Value {
        json!({ "labels": self.labels })
    }
}

/// Free-form questions, optionally with multiple-choice answers.
///
/// `choices` is built fresh for each instance; leaving it out means free text.
#[derive(Debug, Clone, PartialEq)]
pub struct QualitativeFeedback {
    questions: Vec<String>,
    choices: Vec<String>,
}

impl QualitativeFeedback {
    pub fn new<I, S>(questions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let questions = owned(questions);
        check_list("questions", &questions)?;
        Ok(Self {
            questions,
            choices: Vec::new(),
        })
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = owned(choices);
        check_list("choices", &choices)?;
        self.choices = choices;
        Ok(self)
    }
}

impl Step for QualitativeFeedback {
    fn class_name(&self) -> &str {
        "QualitativeFeedback"
    }

    fn params(&self) -> Value {
        json!({ "questions": self.questions, "choices": self.choices })
    }
}
