//! Resolved input specifications.

use std::sync::Arc;

use crate::error::SourceError;
use crate::io::{CharSource, FileSource, InMemorySource};
use crate::iter::Delimiter;
use crate::sequence::{CsvRecord, LazySequence};

use super::InputConfig;

/// Where an input's characters come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A file on disk
    File,
    /// Text embedded in the configuration
    Inline,
}

impl SourceKind {
    /// Parse a source kind from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Some(SourceKind::File),
            "inline" | "text" => Some(SourceKind::Inline),
            _ => None,
        }
    }
}

/// How an input's characters are split into items.
#[derive(Debug, Clone, Default)]
pub enum Layout {
    /// One item per line
    #[default]
    Lines,
    /// Items separated by a delimiter
    Delimited(Delimiter),
}

/// Specification for a single input, ready to be opened.
#[derive(Debug, Clone)]
pub struct InputSpec {
    /// Identifier from the configuration
    pub id: String,
    /// The source to read from
    pub source: Arc<dyn CharSource>,
    /// How the source is split
    pub layout: Layout,
}

impl InputSpec {
    /// Create a new input specification using the line layout.
    pub fn new(id: impl Into<String>, source: Arc<dyn CharSource>) -> Self {
        Self {
            id: id.into(),
            source,
            layout: Layout::default(),
        }
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Resolve an [`InputConfig`].
    pub fn from_config(config: &InputConfig) -> Result<Self, SourceError> {
        let kind = SourceKind::from_str(&config.kind).ok_or_else(|| {
            SourceError::Config(format!(
                "unknown input kind '{}' for '{}'",
                config.kind, config.id
            ))
        })?;

        let source: Arc<dyn CharSource> = match kind {
            SourceKind::File => {
                let path = config.path.as_deref().ok_or_else(|| {
                    SourceError::Config(format!("file input '{}' requires a path", config.id))
                })?;
                Arc::new(FileSource::new(path))
            }
            SourceKind::Inline => {
                let text = config.text.clone().ok_or_else(|| {
                    SourceError::Config(format!("inline input '{}' requires text", config.id))
                })?;
                Arc::new(InMemorySource::from_string(config.id.clone(), text))
            }
        };

        let layout = match config.layout.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("lines") => Layout::Lines,
            Some("delimited") => {
                let delimiter = config.delimiter.as_deref().ok_or_else(|| {
                    SourceError::Config(format!(
                        "delimited input '{}' requires a delimiter",
                        config.id
                    ))
                })?;
                if config.literal {
                    Layout::Delimited(Delimiter::literal(delimiter))
                } else {
                    Layout::Delimited(Delimiter::pattern(delimiter)?)
                }
            }
            Some(other) => {
                return Err(SourceError::Config(format!(
                    "unknown layout '{}' for '{}'",
                    other, config.id
                )));
            }
        };

        Ok(Self::new(config.id.clone(), source).with_layout(layout))
    }

    /// Sequence of the items of this input according to its layout.
    pub fn sequence(&self) -> LazySequence<String> {
        let source = Arc::clone(&self.source);
        match &self.layout {
            Layout::Lines => LazySequence::from_lines(source),
            Layout::Delimited(delimiter) => LazySequence::from_delimited(source, delimiter.clone()),
        }
    }

    /// Sequence of the CSV records of this input. The layout is ignored.
    pub fn csv_sequence(&self) -> LazySequence<CsvRecord> {
        LazySequence::from_csv(Arc::clone(&self.source))
    }
}
