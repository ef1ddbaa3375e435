//! Harvesters decide what content the runtime collects from a page.

use crate::error::Result;
use crate::steps::Step;
use crate::validate;
use serde_json::{Value, json};

const TEXT_MODES: [&str; 2] = ["all", "regex"];
const IMAGE_MODES: [&str; 3] = ["all", "src_match", "alt_match"];

#[derive(Debug, Clone, PartialEq)]
pub struct TextHarvester {
    how: String,
    regex: Option<String>,
    limit: Option<usize>,
    body_only: bool,
}

impl TextHarvester {
    pub fn new(how: &str, regex: Option<&str>) -> Result<Self> {
        validate::one_of("how", how, &TEXT_MODES)?;
        let regex = regex.map(str::to_string);
        if how == "regex" {
            let pattern = validate::required_with("regex", "how is 'regex'", regex.as_ref())?;
            validate::non_empty("regex", pattern)?;
        }
        Ok(Self {
            how: how.to_string(),
            regex,
            limit: None,
            body_only: false,
        })
    }

    /// Harvests every text node on the page.
    pub fn all() -> Self {
        Self {
            how: "all".to_string(),
            regex: None,
            limit: None,
            body_only: false,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Result<Self> {
        validate::positive("limit", Some(limit))?;
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn body_only(mut self, body_only: bool) -> Self {
        self.body_only = body_only;
        self
    }
}

impl Step for TextHarvester {
    fn class_name(&self) -> &str {
        "TextHarvester"
    }

    fn params(&self) -> Value {
        json!({
            "how": self.how,
            "regex": self.regex,
            "limit": self.limit,
            "bodyOnly": self.body_only,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageHarvester {
    how: String,
    src_match: Option<String>,
    alt_match: Option<String>,
    limit: Option<usize>,
    min_height: Option<usize>,
    min_width: Option<usize>,
}

impl ImageHarvester {
    /// `pattern` is matched against the image `src` or `alt` attribute
    /// depending on `how`, and is ignored for `all`.
    pub fn new(how: &str, pattern: Option<&str>) -> Result<Self> {
        validate::one_of("how", how, &IMAGE_MODES)?;
        let pattern = pattern.map(str::to_string);
        let (src_match, alt_match) = match how {
            "src_match" => {
                let p = validate::required_with("pattern", "how is 'src_match'", pattern.as_ref())?;
                (Some(p.clone()), None)
            }
            "alt_match" => {
                let p = validate::required_with("pattern", "how is 'alt_match'", pattern.as_ref())?;
                (None, Some(p.clone()))
            }
            _ => (None, None),
        };
        Ok(Self {
            how: how.to_string(),
            src_match,
            alt_match,
            limit: None,
            min_height: None,
            min_width: None,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Result<Self> {
        validate::positive("limit", Some(limit))?;
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn with_min_size(mut self, height: usize, width: usize) -> Result<Self> {
        validate::positive("min_height", Some(height))?;
        validate::positive("min_width", Some(width))?;
        self.min_height = Some(height);
        self.min_width = Some(width);
        Ok(self)
    }
}

impl Step for ImageHarvester {
    fn class_name(&self) -> &str {
        "ImageHarvester"
    }

    fn params(&self) -> Value {
        json!({
            "how": self.how,
            "srcMatch": self.src_match,
            "altMatch": self.alt_match,
            "limit": self.limit,
            "minHeight": self.min_height,
            "minWidth": self.min_width,
        })
    }
}

/// Harvests values from the page URL's query string.
///
/// Both lists are owned per instance; an omitted list serializes as `[]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParameterHarvester {
    params: Vec<String>,
    additional_params: Vec<String>,
}

impl QueryParameterHarvester {
    pub fn new<I, S>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params: Vec<String> = params.into_iter().map(Into::into).collect();
        for p in &params {
            validate::non_empty("params", p)?;
        }
        Ok(Self {
            params,
            additional_params: Vec::new(),
        })
    }

    pub fn with_additional<I, S>(mut self, additional: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for p in additional {
            let p = p.into();
            validate::non_empty("additional_params", &p)?;
            self.additional_params.push(p);
        }
        Ok(self)
    }
}

impl Step for QueryParameterHarvester {
    fn class_name(&self) -> &str {
        "QueryParameterHarvester"
    }

    fn params(&self) -> Value {
        json!({
            "params": self.params,
            "additionalParams": self.additional_params,
        })
    }
}
