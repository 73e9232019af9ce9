// ABOUTME: Slide discovery module for the slidedeck application
// ABOUTME: Finds slide source files by name and returns them in lexicographic order

use crate::errors::{DeckError, Result};
use glob::Pattern;
use log::{debug, info};
#[cfg(not(unix))]
use log::warn;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Naming convention that marks a directory entry as a slide source.
///
/// Slides are ordered by byte-wise comparison of their file names, so
/// `slide10.html` sorts before `slide2.html`. Name slides with zero-padded
/// numbers (`slide01.html`, `slide02.html`, ...) to get numeric order.
///
/// Byte order on UTF-8 names equals code point order. It can differ from
/// UTF-16 code unit order for names mixing characters above U+FFFF with
/// characters at U+E000 or above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePattern {
    pub prefix: String,
    pub extension: String,
}

impl Default for SlidePattern {
    fn default() -> Self {
        Self {
            prefix: "slide".to_string(),
            extension: ".html".to_string(),
        }
    }
}

impl SlidePattern {
    pub fn new(prefix: &str, extension: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Glob form of this convention, e.g. `slide*.html`, used in log output
    pub fn glob(&self) -> String {
        format!(
            "{}*{}",
            Pattern::escape(&self.prefix),
            Pattern::escape(&self.extension)
        )
    }

    /// Check whether a bare file name follows the convention
    pub fn matches(&self, name: &str) -> bool {
        self.matches_bytes(name.as_bytes())
    }

    /// Byte-level match, for file names that are not valid UTF-8
    pub fn matches_bytes(&self, name: &[u8]) -> bool {
        name.starts_with(self.prefix.as_bytes()) && name.ends_with(self.extension.as_bytes())
    }
}

/// Raw bytes of a file name, used for both matching and ordering
#[cfg(unix)]
fn name_bytes(name: &OsStr) -> Option<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;

    Some(name.as_bytes().to_vec())
}

#[cfg(not(unix))]
fn name_bytes(name: &OsStr) -> Option<Vec<u8>> {
    match name.to_str() {
        Some(name) => Some(name.as_bytes().to_vec()),
        None => {
            warn!("Skipping entry with non UTF-8 name: {:?}", name);
            None
        }
    }
}

/// Find slide source files in `dir`, sorted byte-wise by file name
pub fn locate_slides(dir: &Path, pattern: &SlidePattern) -> Result<Vec<PathBuf>> {
    info!("Looking for {} in {:?}", pattern.glob(), dir);

    let entries = fs::read_dir(dir).map_err(|e| DeckError::io(dir, e))?;

    let mut slides: Vec<(Vec<u8>, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DeckError::io(dir, e))?;
        let Some(name) = name_bytes(&entry.file_name()) else {
            continue;
        };
        if !pattern.matches_bytes(&name) {
            continue;
        }

        let file_type = entry.file_type().map_err(|e| DeckError::io(entry.path(), e))?;
        if file_type.is_dir() {
            debug!("Skipping directory {:?}", entry.path());
            continue;
        }

        slides.push((name, entry.path()));
    }

    slides.sort_by(|a, b| a.0.cmp(&b.0));

    info!("Found {} slides to convert", slides.len());
    Ok(slides.into_iter().map(|(_, path)| path).collect())
}

/// Report whether the lexicographic order differs from the order the
/// digits in the file names suggest (`slide10.html` before `slide2.html`).
pub fn numeric_order_mismatch(paths: &[PathBuf]) -> bool {
    let numbers: Vec<Option<u64>> = paths
        .iter()
        .map(|p| {
            p.file_name()
                .and_then(|n| first_number(&n.to_string_lossy()))
        })
        .collect();

    numbers.windows(2).any(|pair| match (pair[0], pair[1]) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    })
}

fn first_number(name: &str) -> Option<u64> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
