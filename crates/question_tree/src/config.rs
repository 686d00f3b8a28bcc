use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_INDENTATION_WIDTH: f32 = 50.;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tree config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("indentation width must be a positive number of pixels, got {0}")]
    InvalidIndentation(f32),
}

/// Settings for a [`QuestionTreeState`](crate::QuestionTreeState).
///
/// The toggles only decide which operations are offered; the projection math only
/// depends on `indentation_width`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Pixels of horizontal drag per depth level. Should match the indentation used by
    /// the row renderer.
    pub indentation_width: f32,
    pub collapsible: bool,
    pub removable: bool,
    /// Render the dragged node as a slim drop indicator instead of a full row.
    pub indicator: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            indentation_width: DEFAULT_INDENTATION_WIDTH,
            collapsible: false,
            removable: false,
            indicator: false,
        }
    }
}

impl TreeConfig {
    pub fn indentation_width(mut self, indentation_width: f32) -> Self {
        self.indentation_width = indentation_width;
        self
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    pub fn removable(mut self, removable: bool) -> Self {
        self.removable = removable;
        self
    }

    pub fn indicator(mut self, indicator: bool) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.indentation_width.is_finite() || self.indentation_width <= 0. {
            return Err(ConfigError::InvalidIndentation(self.indentation_width));
        }
        Ok(())
    }

    /// Parse and validate a config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
