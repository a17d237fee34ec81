//! # PetVax API
//!
//! REST server for pet vaccination records.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         API Components                                  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes        │  │  service       │  │  notification              ││
//! │  │                │  │                │  │                            ││
//! │  │ • /api/pets    │─►│ • PetService   │─►│ • SmtpNotifier (lettre)    ││
//! │  │ • /health      │  │                │  │ • LogNotifier              ││
//! │  └────────────────┘  └───────┬────────┘  └────────────────────────────┘│
//! │                              │                                          │
//! │                              ▼                                          │
//! │                     petvax-db PetRepository                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]: `petvax.toml` plus `PETVAX__*` environment variables.

pub mod config;
pub mod error;
pub mod extract;
pub mod notification;
pub mod routes;
pub mod service;
pub mod state;

// Re-exports
pub use config::AppConfig;
pub use error::ApiError;
pub use routes::router;
pub use service::PetService;
pub use state::AppState;
