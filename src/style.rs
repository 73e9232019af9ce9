// ABOUTME: Stylesheet handling for the slidedeck application
// ABOUTME: Reads the one stylesheet shared by every slide in the deck

use crate::errors::Result;
use crate::loader::read_text;
use log::info;
use std::path::Path;

/// Read the shared stylesheet verbatim.
/// There is no fallback: a missing stylesheet fails the run.
pub fn load_stylesheet(path: &Path) -> Result<String> {
    info!("Reading stylesheet: {:?}", path);
    read_text(path)
}
