use std::sync::Arc;

use crate::bot::connector::ActivitySender;
use crate::config::Config;
use crate::llm_client::CompletionClient;
use crate::matching::uploads::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every handle is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Completion backend. Default: `OpenAiClient`.
    pub llm: Arc<dyn CompletionClient>,
    pub uploads: UploadStore,
    /// Delivers bot replies. Default: `ConnectorClient`.
    pub bot: Arc<dyn ActivitySender>,
}
