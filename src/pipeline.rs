// ABOUTME: Conversion pipeline for the slidedeck application
// ABOUTME: Runs locate, load, style, render and write once, in that order

use crate::assembler::DeckAssembler;
use crate::config::Config;
use crate::errors::Result;
use crate::loader::load_slides;
use crate::locator::{locate_slides, numeric_order_mismatch};
use crate::render::DeckRenderer;
use crate::style::load_stylesheet;
use crate::writer::write_artifact;
use log::{info, warn};
use std::path::PathBuf;

/// One conversion of a slides directory into a deck
pub struct Pipeline<R> {
    config: Config,
    renderer: R,
}

impl<R: DeckRenderer> Pipeline<R> {
    pub fn new(config: Config, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Slide files in the order they will appear in the deck
    pub fn plan(&self) -> Result<Vec<PathBuf>> {
        let paths = locate_slides(&self.config.slides_dir, &self.config.pattern)?;
        if numeric_order_mismatch(&paths) {
            warn!(
                "Slides are ordered by name, not by number; zero-pad the numbers in {} to keep them in sequence",
                self.config.pattern.glob()
            );
        }
        Ok(paths)
    }

    /// Run the conversion and return the path of the written deck.
    ///
    /// Any failure stops the run; the output file is only touched after a
    /// successful render.
    pub fn run(&self) -> Result<PathBuf> {
        let paths = self.plan()?;
        let slides = load_slides(&paths)?;
        let css = load_stylesheet(&self.config.stylesheet_path())?;

        let assembler = DeckAssembler::new(self.config.geometry, self.config.empty_policy)
            .with_source_dir(&self.config.slides_dir);
        let buffer = assembler.assemble(&self.renderer, slides, css)?;

        let output_path = self.config.output_path();
        write_artifact(&buffer, &output_path)?;
        info!("Created {:?} with {} slides", output_path, paths.len());
        Ok(output_path)
    }
}
