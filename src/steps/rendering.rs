//! Renderers control how results are drawn back onto the page.

use crate::error::Result;
use crate::steps::Step;
use crate::validate;
use serde_json::{Value, json};

const BADGE_SHAPES: [&str; 4] = ["star", "circle", "square", "triangle"];
const POSITIONS: [&str; 4] = ["top", "bottom", "left", "right"];

/// Badges or highlights individual words.
#[derive(Debug, Clone, PartialEq)]
pub struct WordRendering {
    badge_shape: String,
    badge_color: String,
    highlight_color: Option<String>,
    words: Vec<String>,
}

impl WordRendering {
    pub fn new(badge_shape: &str, badge_color: &str) -> Result<Self> {
        validate::one_of("badge_shape", badge_shape, &BADGE_SHAPES)?;
        validate::color("badge_color", badge_color)?;
        Ok(Self {
            badge_shape: badge_shape.to_string(),
            badge_color: badge_color.to_string(),
            highlight_color: None,
            words: Vec::new(),
        })
    }

    pub fn with_highlight(mut self, color: &str) -> Result<Self> {
        validate::color("highlight_color", color)?;
        self.highlight_color = Some(color.to_string());
        Ok(self)
    }

    /// Restricts rendering to the given words; all words are rendered otherwise.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = words.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for WordRendering {
    fn default() -> Self {
        Self {
            badge_shape: "star".to_string(),
            badge_color: "blue".to_string(),
            highlight_color: None,
            words: Vec::new(),
        }
    }
}

impl Step for WordRendering {
    fn class_name(&self) -> &str {
        "WordRendering"
    }

    fn params(&self) -> Value {
        json!({
            "badgeShape": self.badge_shape,
            "badgeColor": self.badge_color,
            "highlightColor": self.highlight_color,
            "words": self.words,
        })
    }
}

/// One badge for the whole document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRendering {
    position: String,
    badge_color: String,
    include_probability: bool,
}

impl DocumentRendering {
    pub fn new(position: &str, badge_color: &str, include_probability: bool) -> Result<Self> {
        validate::one_of("position", position, &POSITIONS)?;
        validate::color("badge_color", badge_color)?;
        Ok(Self {
            position: position.to_string(),
            badge_color: badge_color.to_string(),
            include_probability,
        })
    }
}

impl Step for DocumentRendering {
    fn class_name(&self) -> &str {
        "DocumentRendering"
    }

    fn params(&self) -> Value {
        json!({
            "position": self.position,
            "badgeColor": self.badge_color,
            "includeProbability": self.include_probability,
        })
    }
}

/// Labels a whole image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRendering {
    color: String,
    thickness: usize,
    placement: String,
    include_probability: bool,
}

impl ImageRendering {
    pub fn new(color: &str, thickness: usize, placement: &str) -> Result<Self> {
        validate::color("color", color)?;
        validate::positive("thickness", Some(thickness))?;
        validate::one_of("placement", placement, &POSITIONS)?;
        Ok(Self {
            color: color.to_string(),
            thickness,
            placement: placement.to_string(),
            include_probability: false,
        })
    }

    pub fn include_probability(mut self, include: bool) -> Self {
        self.include_probability = include;
        self
    }
}

impl Step for ImageRendering {
    fn class_name(&self) -> &str {
        "ImageRendering"
    }

    fn params(&self) -> Value {
        json!({
            "color": self.color,
            "thickness": self.thickness,
            "placement": self.placement,
            "includeProbability": self.include_probability,
        })
    }
}

/// Bounding boxes for detected objects.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRendering {
    color: String,
    thickness: usize,
    include_probability: bool,
}

impl ObjectRendering {
    pub fn new(color: &str, thickness: usize, include_probability: bool) -> Result<Self> {
        validate::color("color", color)?;
        validate::positive("thickness", Some(thickness))?;
        Ok(Self {
            color: color.to_string(),
            thickness,
            include_probability,
        })
    }
}

impl Step for ObjectRendering {
    fn class_name(&self) -> &str {
        "ObjectRendering"
    }

    fn params(&self) -> Value {
        json!({
            "color": self.color,
            "thickness": self.thickness,
            "includeProbability": self.include_probability,
        })
    }
}
