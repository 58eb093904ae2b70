//! Core traits and types for Style-Finder
//!
//! This crate defines the outfit analysis data model, the vision model seam
//! and the parser that turns a free-text model reply into structured fields.
//! Transport crates (`sf-vision`, `sf-api`) build on these interfaces.

pub mod error;
pub mod outfit;
pub mod parser;
pub mod vision;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use outfit::{OUTFIT_PROMPT, OutfitAnalysis, StyleSummary, SuggestedItem};
pub use parser::{CATALOG_SEARCH_URL, HeadingParser, ResponseParser, SectionKind, parse};
pub use vision::{GenerationConfig, VisionModel};
