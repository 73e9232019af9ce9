// ABOUTME: Slide loading module for the slidedeck application
// ABOUTME: Reads located slide files into ordered slide records

use crate::errors::{DeckError, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// The markup of one slide, as handed to the rendering engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRecord {
    pub html: String,
}

impl SlideRecord {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Load every slide in order; the first unreadable file aborts the whole load
pub fn load_slides(paths: &[PathBuf]) -> Result<Vec<SlideRecord>> {
    let mut slides = Vec::with_capacity(paths.len());
    for path in paths {
        let html = read_text(path)?;
        debug!("Loaded {:?} ({} bytes)", path, html.len());
        slides.push(SlideRecord { html });
    }
    Ok(slides)
}

/// Read a file as UTF-8 text. Invalid sequences become U+FFFD.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| DeckError::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!("{:?} is not valid UTF-8; invalid bytes were replaced", path);
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
