// ABOUTME: Artifact writing module for the slidedeck application
// ABOUTME: Persists the rendered deck through a temp file and rename

use crate::errors::{DeckError, Result};
use crate::render::DeckBuffer;
use log::{info, warn};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write the deck to `output_path`, replacing any existing file.
///
/// The bytes land in a temporary file next to the target first, so a failed
/// write never leaves a truncated artifact behind.
pub fn write_artifact(buffer: &DeckBuffer, output_path: &Path) -> Result<()> {
    info!("Writing deck to file: {:?}", output_path);

    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| DeckError::io(parent, e))?;
    temp.write_all(buffer.as_bytes())
        .map_err(|e| DeckError::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| DeckError::io(temp.path(), e))?;

    keep_permissions(&temp, output_path);

    temp.persist(output_path)
        .map_err(|e| DeckError::io(output_path, e.error))?;

    info!("Created {:?}", output_path);
    Ok(())
}

// Temp files are created owner-only; give the artifact the mode of the file it
// replaces, or the usual 0644 when there is none.
#[cfg(unix)]
fn keep_permissions(temp: &NamedTempFile, output_path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match std::fs::metadata(output_path) {
        Ok(metadata) => metadata.permissions(),
        Err(_) => std::fs::Permissions::from_mode(0o644),
    };
    if let Err(e) = temp.as_file().set_permissions(permissions) {
        warn!("Failed to set permissions on {:?}: {}", temp.path(), e);
    }
}

#[cfg(not(unix))]
fn keep_permissions(_temp: &NamedTempFile, _output_path: &Path) {}
