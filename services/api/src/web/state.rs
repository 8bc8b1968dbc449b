//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::course::CourseOrchestrator;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Read-only after startup; every request runs its own orchestration.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<CourseOrchestrator>,
}
