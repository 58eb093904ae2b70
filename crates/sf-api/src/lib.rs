//! HTTP interface for Style-Finder
//!
//! Two routes: a welcome message at `GET /` and the outfit analysis upload at
//! `POST /api/analyze`. Handlers only see an [`AppState`] built at startup.

mod error;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use routes::{MAX_UPLOAD_BYTES, WELCOME_MESSAGE, router};
pub use server::{ServerConfig, serve};
pub use state::AppState;

// Re-export core types
pub use sf_core::{Error, Result};
