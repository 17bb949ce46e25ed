// src/state.rs
use std::sync::Arc;

use crate::services::chatbot::ChatService;
use crate::services::metrics_manager::MetricsManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub chat: ChatService,
    pub metrics: MetricsManager,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat,
            metrics: MetricsManager::new(),
        }
    }
}
