// ABOUTME: Library module for the slidedeck program.
// ABOUTME: Assembles a directory of HTML slide fragments into a single presentation.

// Reexport modules
pub mod assembler;
pub mod config;
pub mod errors;
pub mod html;
pub mod loader;
pub mod locator;
pub mod pipeline;
pub mod pptx;
pub mod render;
pub mod style;
pub mod writer;

// Reexport common types and functions
pub use assembler::{DeckAssembler, EmptyDeckPolicy, Geometry};
pub use config::Config;
pub use errors::{DeckError, Result};
pub use loader::{load_slides, SlideRecord};
pub use locator::{locate_slides, numeric_order_mismatch, SlidePattern};
pub use pipeline::Pipeline;
pub use pptx::PptxRenderer;
pub use render::{DeckBuffer, DeckConfig, DeckRenderer};
pub use style::load_stylesheet;
pub use writer::write_artifact;
