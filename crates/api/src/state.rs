use std::sync::Arc;

use okr_core::conversation::ConversationEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: okr_db::DbPool,
    /// Server configuration, including the token signing key.
    pub config: Arc<ServerConfig>,
    /// External conversational reply service.
    pub conversation: Arc<dyn ConversationEngine>,
}
