// ABOUTME: Configuration module for the slidedeck application
// ABOUTME: Holds the compiled-in defaults and resolves paths against the slides directory

use crate::assembler::{EmptyDeckPolicy, Geometry};
use crate::locator::SlidePattern;
use std::path::{Path, PathBuf};

/// Default name of the shared stylesheet inside the slides directory
pub const DEFAULT_STYLESHEET: &str = "styles.css";

/// Default name of the generated deck inside the slides directory
pub const DEFAULT_OUTPUT: &str = "slides.pptx";

/// Configuration for a single conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub slides_dir: PathBuf,
    pub pattern: SlidePattern,
    pub stylesheet: PathBuf,
    pub output: PathBuf,
    pub geometry: Geometry,
    pub empty_policy: EmptyDeckPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slides_dir: PathBuf::from("."),
            pattern: SlidePattern::default(),
            stylesheet: PathBuf::from(DEFAULT_STYLESHEET),
            output: PathBuf::from(DEFAULT_OUTPUT),
            geometry: Geometry::default(),
            empty_policy: EmptyDeckPolicy::default(),
        }
    }
}

impl Config {
    /// Create a configuration that reads slides from `slides_dir`
    pub fn new(slides_dir: impl Into<PathBuf>) -> Self {
        Self {
            slides_dir: slides_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_pattern(mut self, pattern: SlidePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: impl Into<PathBuf>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_empty_policy(mut self, policy: EmptyDeckPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    /// Path of the stylesheet, relative names resolved against the slides directory
    pub fn stylesheet_path(&self) -> PathBuf {
        resolve(&self.slides_dir, &self.stylesheet)
    }

    /// Path of the output artifact, relative names resolved against the slides directory
    pub fn output_path(&self) -> PathBuf {
        resolve(&self.slides_dir, &self.output)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
