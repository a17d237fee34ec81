//! # Application State
//!
//! Shared by every handler through `axum::extract::State`.
//!
//! ## Thread Safety
//! `Database` wraps a `SqlitePool` and `PetService` holds only `Arc`s, so
//! cloning the state per request is cheap and needs no locking.

use std::sync::Arc;

use petvax_core::Notifier;
use petvax_db::Database;

use crate::service::PetService;

/// Handler state.
#[derive(Clone)]
pub struct AppState {
    /// Pet record operations.
    pub service: PetService,

    /// Kept for health checks.
    pub db: Database,
}

impl AppState {
    /// Wires the service to the database's pet repository and `notifier`.
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        let service = PetService::new(Arc::new(db.pets()), notifier);
        AppState { service, db }
    }
}
