//! # Data Transfer Objects
//!
//! Wire representations for the REST boundary.
//!
//! ## Why DTOs?
//! - Decouples the domain model from the API contract
//! - Request fields are all optional so a missing value becomes a field-level
//!   validation error instead of an unreadable body
//! - camelCase renames for JavaScript clients
//!
//! ## Shapes
//! ```text
//! PetRequest  ──validate──►  ValidPetRequest  ──to_domain──►  Pet
//!                                                              │
//! ApiResponse<PetResponse>  ◄──────────── to_response ─────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{PetId, Species, Vaccination};

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/pets` and `PUT /api/pets/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub species: Option<Species>,

    #[serde(default)]
    pub breed: Option<String>,

    #[serde(default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub owner_contact: Option<String>,

    #[serde(default)]
    pub owner_email: Option<String>,

    /// Absent and `null` both mean "no vaccinations".
    #[serde(default)]
    pub vaccines: Option<Vec<VaccinationRequest>>,
}

/// One vaccination inside a [`PetRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRequest {
    #[serde(default)]
    pub name: Option<String>,

    /// ISO date (`2024-01-01`).
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date_given: Option<NaiveDate>,
}

/// A [`PetRequest`] that passed validation.
///
/// Only [`crate::validation::validate_pet_request`] builds these, so every
/// required value is present and every rule holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPetRequest {
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub owner_name: String,
    pub owner_contact: String,
    pub owner_email: String,
    pub vaccines: Option<Vec<Vaccination>>,
}

// =============================================================================
// Responses
// =============================================================================

/// Pet as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: Option<PetId>,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub owner_name: String,
    pub owner_contact: String,
    pub owner_email: String,
    pub vaccines: Vec<VaccinationDto>,
}

/// Vaccination as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationDto {
    pub name: String,

    #[ts(as = "String")]
    pub date_given: NaiveDate,
}

/// Envelope wrapping every response body.
///
/// ## Serialization
/// ```json
/// { "message": "Pet updated successfully", "data": { "id": 1, ... } }
/// { "message": "Pet with ID: 9 was not found.", "data": null }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiResponse<T> {
    /// Human-readable outcome.
    pub message: String,

    /// Payload, or `null`.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Envelope carrying a payload.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            message: message.into(),
            data: Some(data),
        }
    }

    /// Envelope with `data: null`.
    pub fn message_only(message: impl Into<String>) -> Self {
        ApiResponse {
            message: message.into(),
            data: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
