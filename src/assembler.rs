// ABOUTME: Deck assembly module for the slidedeck application
// ABOUTME: Combines slides, shared style and geometry and makes the single render call

use crate::errors::{DeckError, Result};
use crate::loader::SlideRecord;
use crate::render::{DeckBuffer, DeckConfig, DeckRenderer};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Canvas dimensions in inches, fixed for the whole deck
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    width: f64,
    height: f64,
}

impl Default for Geometry {
    /// 16:9 at 10 inches wide
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 5.625,
        }
    }
}

impl Geometry {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        for (name, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DeckError::InvalidGeometry(format!(
                    "{} must be a positive number of inches, got {}",
                    name, value
                )));
            }
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// What to do when no slide files were found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyDeckPolicy {
    /// Hand the renderer an empty slide sequence
    #[default]
    Render,
    /// Fail with [`DeckError::EmptyDeck`] before rendering
    Reject,
}

/// Builds the deck configuration and invokes the renderer once
#[derive(Debug, Clone)]
pub struct DeckAssembler {
    geometry: Geometry,
    empty_policy: EmptyDeckPolicy,
    source_dir: PathBuf,
}

impl DeckAssembler {
    pub fn new(geometry: Geometry, empty_policy: EmptyDeckPolicy) -> Self {
        Self {
            geometry,
            empty_policy,
            source_dir: PathBuf::new(),
        }
    }

    /// Directory reported by [`DeckError::EmptyDeck`]
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Configuration the renderer will receive for `css`
    pub fn deck_config(&self, css: String) -> DeckConfig {
        DeckConfig {
            width: self.geometry.width,
            height: self.geometry.height,
            css,
        }
    }

    /// Render the deck. Renderer failures are returned as they are.
    pub fn assemble<R: DeckRenderer>(
        &self,
        renderer: &R,
        slides: Vec<SlideRecord>,
        css: String,
    ) -> Result<DeckBuffer> {
        if slides.is_empty() {
            match self.empty_policy {
                EmptyDeckPolicy::Reject => {
                    return Err(DeckError::EmptyDeck {
                        dir: self.source_dir.clone(),
                    });
                }
                EmptyDeckPolicy::Render => warn!("Rendering a deck with no slides"),
            }
        }

        let config = self.deck_config(css);
        info!(
            "Rendering {} slides at {}x{} inches",
            slides.len(),
            config.width,
            config.height
        );

        let start_time = Instant::now();
        let buffer = renderer.render(&slides, &config)?;
        info!(
            "Rendering complete: {} bytes in {:.2} seconds",
            buffer.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(buffer)
    }
}
