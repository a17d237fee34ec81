//! # petvax-core: Pure Domain Logic for PetVax
//!
//! This crate holds the pet vaccination domain as pure types and functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PetVax Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST boundary (apps/api)                     │   │
//! │  │    GET/POST /api/pets, GET/PUT/DELETE /api/pets/{id}, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ petvax-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    dto    │  │  mapper   │  │ validation│  │   │
//! │  │   │   Pet     │  │PetRequest │  │ to_domain │  │   rules   │  │   │
//! │  │   │  Species  │  │PetResponse│  │to_response│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                         ┌───────────┐                          │   │
//! │  │                         │   ports   │ PetStore, Notifier       │   │
//! │  │                         └───────────┘                          │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  petvax-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Pet, Vaccination, Species)
//! - [`dto`] - Wire representations (request, response, envelope)
//! - [`mapper`] - Conversions between wire and domain types
//! - [`validation`] - Request validation rules
//! - [`ports`] - Traits implemented by the store and notification adapters
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use petvax_core::dto::{PetRequest, VaccinationRequest};
//! use petvax_core::{mapper, validation, Species};
//!
//! let request = PetRequest {
//!     name: Some("Rex".into()),
//!     species: Some(Species::Dog),
//!     breed: None,
//!     owner_name: Some("Alice".into()),
//!     owner_contact: Some("1234567890".into()),
//!     owner_email: Some("a@x.com".into()),
//!     vaccines: Some(vec![VaccinationRequest {
//!         name: Some("Rabies".into()),
//!         date_given: NaiveDate::from_ymd_opt(2024, 1, 1),
//!     }]),
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let valid = validation::validate_pet_request(request, today).unwrap();
//! let pet = mapper::to_domain(valid);
//!
//! assert_eq!(pet.id, None);
//! assert_eq!(pet.vaccinations.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod mapper;
pub mod ports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use ports::{Notifier, PetStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a pet name or owner name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Number of digits in an owner contact number.
pub const CONTACT_DIGITS: usize = 10;
