//! Shared request state

use std::sync::Arc;

use sf_core::{HeadingParser, OUTFIT_PROMPT, ResponseParser, VisionModel};

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn VisionModel>,
    pub parser: Arc<dyn ResponseParser>,
    pub prompt: Arc<str>,
}

impl AppState {
    /// State with the default heading parser and outfit prompt
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self {
            model,
            parser: Arc::new(HeadingParser::default()),
            prompt: Arc::from(OUTFIT_PROMPT),
        }
    }

    /// Swap in a different reply parser
    pub fn with_parser(mut self, parser: Arc<dyn ResponseParser>) -> Self {
        self.parser = parser;
        self
    }
}
