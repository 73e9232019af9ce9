// ABOUTME: Error types for the slidedeck application
// ABOUTME: Provides structured error handling for each stage of the pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rendering engine error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No slides found in {dir:?}")]
    EmptyDeck { dir: PathBuf },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl DeckError {
    /// Wrap an I/O failure together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a rendering failure with no underlying cause
    pub fn render(message: impl Into<String>) -> Self {
        DeckError::Render {
            message: message.into(),
            source: None,
        }
    }

    /// True for failures raised by the rendering engine
    pub fn is_render(&self) -> bool {
        matches!(self, DeckError::Render { .. })
    }

    /// True for file and directory access failures
    pub fn is_io(&self) -> bool {
        matches!(self, DeckError::Io { .. })
    }
}

// Zip failures only happen while the engine encodes the package
impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::Render {
            message: format!("ZIP operation failed: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
