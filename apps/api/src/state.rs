use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; handlers never coordinate through it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Hosted chat model. `OpenAiClient` in production, scripted in tests.
    pub llm: Arc<dyn ChatModel>,
}
