//! Pipeline configuration for declaring sequence inputs.

use serde::Deserialize;

#[cfg(any(feature = "json", feature = "yaml", feature = "toml"))]
use crate::error::SourceError;

/// Configuration for a whole pipeline: its inputs, read in order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Input configurations
    #[serde(default)]
    pub inputs: Vec<InputConfig>,
}

/// Configuration for a single input.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Unique identifier for this input
    pub id: String,
    /// Kind of input: "file" or "inline"
    pub kind: String,
    /// File path (for file inputs)
    #[serde(default)]
    pub path: Option<String>,
    /// Literal content (for inline inputs)
    #[serde(default)]
    pub text: Option<String>,
    /// How the content is split: "lines" (default) or "delimited"
    #[serde(default)]
    pub layout: Option<String>,
    /// Delimiter for the "delimited" layout
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Match the delimiter literally instead of as a regular expression
    #[serde(default)]
    pub literal: bool,
}

impl InputConfig {
    /// Create an input configuration with no content attached yet.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            path: None,
            text: None,
            layout: None,
            delimiter: None,
            literal: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Split on `delimiter`, as a regular expression unless `literal`.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>, literal: bool) -> Self {
        self.layout = Some("delimited".into());
        self.delimiter = Some(delimiter.into());
        self.literal = literal;
        self
    }
}

impl PipelineConfig {
    /// Create a new empty pipeline configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input configuration.
    pub fn add_input(mut self, input: InputConfig) -> Self {
        self.inputs.push(input);
        self
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, SourceError> {
        serde_yaml::from_str(s).map_err(|e| SourceError::Config(e.to_string()))
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, SourceError> {
        serde_json::from_str(s).map_err(|e| SourceError::Config(e.to_string()))
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, SourceError> {
        toml::from_str(s).map_err(|e| SourceError::Config(e.to_string()))
    }
}
