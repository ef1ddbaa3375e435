//! Preprocessors: ordered transformations applied to harvested data before
//! it reaches the analytic.
//!
//! The individual transformations (`TextStep`, `TabularStep`, `ImageStep`) are
//! not steps in their own right: they only enter a graph inside the
//! preprocessor that validated them.

use crate::error::{Error, Result};
use crate::steps::Step;
use crate::validate;
use serde_json::{Value, json};

const LOCATIONS: [&str; 2] = ["start", "end"];
const COLOR_MODES: [&str; 2] = ["rgb", "grayscale"];
const RESIZE_METHODS: [&str; 4] = ["bilinear", "nearest", "bicubic", "area"];

/// Serialized form of one transformation inside a preprocessor's `steps` list.
trait Transform {
    fn class_name(&self) -> &'static str;
    fn params(&self) -> Value;
}

/// A text transformation, added through [`TextPreprocessor`]:
///
/// ```compile_fail
/// use airpack::ConfigBuilder;
/// use airpack::steps::preprocessing::TextStep;
///
/// let mut graph = ConfigBuilder::new("demo").build().unwrap();
/// graph.add_node(&TextStep::Trim, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TextStep {
    RemoveCharacters {
        remove_digits: bool,
        remove_punctuation: bool,
    },
    ConvertToCase {
        lowercase: bool,
    },
    Tokenize {
        split_sentences: bool,
        split_words: bool,
    },
    ConvertToVocabulary {
        vocabulary: Vec<String>,
        start_character: usize,
        oov_character: usize,
        max_vocab: Option<usize>,
    },
    PadSequences {
        pad_character: usize,
        length: usize,
        pad_location: String,
        truncate_location: String,
    },
    Trim,
}

impl TextStep {
    /// Vocabulary mapping with the usual reserved indices (1 = start, 2 = out of vocabulary).
    pub fn vocabulary<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TextStep::ConvertToVocabulary {
            vocabulary: words.into_iter().map(Into::into).collect(),
            start_character: 1,
            oov_character: 2,
            max_vocab: None,
        }
    }

    /// Pads/truncates to `length` at the end of the sequence, with 0.
    pub fn pad(length: usize) -> Self {
        TextStep::PadSequences {
            pad_character: 0,
            length,
            pad_location: "end".to_string(),
            truncate_location: "end".to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            TextStep::ConvertToVocabulary {
                vocabulary,
                start_character,
                oov_character,
                max_vocab,
            } => {
                if vocabulary.is_empty() {
                    return Err(Error::validation("vocabulary", "must not be empty"));
                }
                if start_character == oov_character {
                    return Err(Error::validation(
                        "oov_character",
                        "must differ from start_character",
                    ));
                }
                validate::positive("max_vocab", *max_vocab)
            }
            TextStep::PadSequences {
                length,
                pad_location,
                truncate_location,
                ..
            } => {
                validate::positive("length", Some(*length))?;
                validate::one_of("pad_location", pad_location, &LOCATIONS)?;
                validate::one_of("truncate_location", truncate_location, &LOCATIONS)
            }
            _ => Ok(()),
        }
    }
}

impl Transform for TextStep {
    fn class_name(&self) -> &'static str {
        match self {
            TextStep::RemoveCharacters { .. } => "RemoveCharacters",
            TextStep::ConvertToCase { .. } => "ConvertToCase",
            TextStep::Tokenize { .. } => "Tokenize",
            TextStep::ConvertToVocabulary { .. } => "ConvertToVocabulary",
            TextStep::PadSequences { .. } => "PadSequences",
            TextStep::Trim => "Trim",
        }
    }

    fn params(&self) -> Value {
        match self {
            TextStep::RemoveCharacters {
                remove_digits,
                remove_punctuation,
            } => json!({ "removeDigits": remove_digits, "removePunctuation": remove_punctuation }),
            TextStep::ConvertToCase { lowercase } => json!({ "lowercase": lowercase }),
            TextStep::Tokenize {
                split_sentences,
                split_words,
            } => json!({ "splitSentences": split_sentences, "splitWords": split_words }),
            TextStep::ConvertToVocabulary {
                vocabulary,
                start_character,
                oov_character,
                max_vocab,
            } => json!({
                "vocabulary": vocabulary,
                "startCharacter": start_character,
                "oovCharacter": oov_character,
                "maxVocab": max_vocab,
            }),
            TextStep::PadSequences {
                pad_character,
                length,
                pad_location,
                truncate_location,
            } => json!({
                "padCharacter": pad_character,
                "length": length,
                "padLocation": pad_location,
                "truncateLocation": truncate_location,
            }),
            TextStep::Trim => json!({}),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabularStep {
    ZScore { column: usize, mean: f64, std: f64 },
    MinMax { column: usize, min: f64, max: f64 },
    OneHot { column: usize, values: Vec<String> },
    DropColumn { column: usize },
}

impl TabularStep {
    pub fn validate(&self) -> Result<()> {
        match self {
            TabularStep::ZScore { mean, std, .. } => {
                validate::finite("mean", *mean)?;
                validate::finite("std", *std)?;
                if *std <= 0.0 {
                    return Err(Error::validation("std", "must be greater than 0"));
                }
                Ok(())
            }
            TabularStep::MinMax { min, max, .. } => {
                validate::finite("min", *min)?;
                validate::finite("max", *max)?;
                if min >= max {
                    return Err(Error::validation("max", "must be greater than min"));
                }
                Ok(())
            }
            TabularStep::OneHot { values, .. } if values.is_empty() => {
                Err(Error::validation("values", "must not be empty"))
            }
            _ => Ok(()),
        }
    }
}

impl Transform for TabularStep {
    fn class_name(&self) -> &'static str {
        match self {
            TabularStep::ZScore { .. } => "ZScore",
            TabularStep::MinMax { .. } => "MinMax",
            TabularStep::OneHot { .. } => "OneHot",
            TabularStep::DropColumn { .. } => "DropColumn",
        }
    }

    fn params(&self) -> Value {
        match self {
            TabularStep::ZScore { column, mean, std } => {
                json!({ "column": column, "mean": mean, "std": std })
            }
            TabularStep::MinMax { column, min, max } => {
                json!({ "column": column, "min": min, "max": max })
            }
            TabularStep::OneHot { column, values } => json!({ "column": column, "values": values }),
            TabularStep::DropColumn { column } => json!({ "column": column }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageStep {
    Resize { size: [u32; 2], method: String },
    AddValue { value: f64 },
    SubtractValue { value: f64 },
    MultiplyValue { value: f64 },
    DivideValue { value: f64 },
    ConvertToColor { color: String },
}

impl ImageStep {
    pub fn resize(height: u32, width: u32) -> Self {
        ImageStep::Resize {
            size: [height, width],
            method: "bilinear".to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ImageStep::Resize { size, method } => {
                if size.contains(&0) {
                    return Err(Error::validation("size", "dimensions must be greater than 0"));
                }
                validate::one_of("method", method, &RESIZE_METHODS)
            }
            ImageStep::DivideValue { value } if *value == 0.0 => {
                Err(Error::validation("value", "cannot divide by 0"))
            }
            ImageStep::AddValue { value }
            | ImageStep::SubtractValue { value }
            | ImageStep::MultiplyValue { value }
            | ImageStep::DivideValue { value } => validate::finite("value", *value),
            ImageStep::ConvertToColor { color } => validate::one_of("color", color, &COLOR_MODES),
        }
    }
}

impl Transform for ImageStep {
    fn class_name(&self) -> &'static str {
        match self {
            ImageStep::Resize { .. } => "Resize",
            ImageStep::AddValue { .. } => "AddValue",
            ImageStep::SubtractValue { .. } => "SubtractValue",
            ImageStep::MultiplyValue { .. } => "MultiplyValue",
            ImageStep::DivideValue { .. } => "DivideValue",
            ImageStep::ConvertToColor { .. } => "ConvertToColor",
        }
    }

    fn params(&self) -> Value {
        match self {
            ImageStep::Resize { size, method } => json!({ "size": size, "method": method }),
            ImageStep::AddValue { value }
            | ImageStep::SubtractValue { value }
            | ImageStep::MultiplyValue { value }
            | ImageStep::DivideValue { value } => json!({ "value": value }),
            ImageStep::ConvertToColor { color } => json!({ "color": color }),
        }
    }
}

fn steps_params<T: Transform>(steps: &[T]) -> Value {
    let steps: Vec<Value> = steps
        .iter()
        .map(|step| json!({ "className": step.class_name(), "params": step.params() }))
        .collect();
    json!({ "steps": steps })
}

macro_rules! preprocessor {
    ($name:ident, $step:ty) => {
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            steps: Vec<$step>,
        }

        impl $name {
            pub fn new(steps: Vec<$step>) -> Result<Self> {
                for step in &steps {
                    step.validate()?;
                }
                Ok(Self { steps })
            }

            pub fn add_step(&mut self, step: $step) -> Result<()> {
                step.validate()?;
                self.steps.push(step);
                Ok(())
            }

            pub fn steps(&self) -> &[$step] {
                &self.steps
            }
        }

        impl Step for $name {
            fn class_name(&self) -> &str {
                stringify!($name)
            }

            fn params(&self) -> Value {
                steps_params(&self.steps)
            }
        }
    };
}

preprocessor!(TextPreprocessor, TextStep);
preprocessor!(TabularPreprocessor, TabularStep);
preprocessor!(ImagePreprocessor, ImageStep);
