// ABOUTME: Rendering engine contract for the slidedeck application
// ABOUTME: Defines the deck configuration, the output buffer and the renderer trait

use crate::errors::Result;
use crate::loader::SlideRecord;

/// Configuration handed to the rendering engine alongside the slides
#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    /// Canvas width in inches
    pub width: f64,
    /// Canvas height in inches
    pub height: f64,
    /// Stylesheet text applied to every slide
    pub css: String,
}

/// Encoded presentation document returned by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckBuffer(Vec<u8>);

impl DeckBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

/// Turns an ordered slide collection into a presentation document.
///
/// Implementations receive the slides in deck order and must either return
/// the whole document or fail with [`DeckError::Render`](crate::DeckError::Render).
pub trait DeckRenderer {
    fn render(&self, slides: &[SlideRecord], config: &DeckConfig) -> Result<DeckBuffer>;
}

impl<R: DeckRenderer + ?Sized> DeckRenderer for &R {
    fn render(&self, slides: &[SlideRecord], config: &DeckConfig) -> Result<DeckBuffer> {
        (**self).render(slides, config)
    }
}

impl<R: DeckRenderer + ?Sized> DeckRenderer for Box<R> {
    fn render(&self, slides: &[SlideRecord], config: &DeckConfig) -> Result<DeckBuffer> {
        (**self).render(slides, config)
    }
}
