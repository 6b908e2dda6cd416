//! Parley: chat and document summarization over a hosted LLM.
//!
//! Uploads are validated, reduced to plain text (PDF or UTF-8) and forwarded
//! to whichever provider (Gemini or OpenAI) the process was configured with.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::{create_router, AppState};
