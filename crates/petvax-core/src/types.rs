//! # Domain Types
//!
//! Core domain types used throughout PetVax.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │      Pet        │ 1    * │  Vaccination    │                        │
//! │  │  ─────────────  │───────►│  ─────────────  │                        │
//! │  │  id (i64)       │        │  name           │                        │
//! │  │  name, species  │        │  date_given     │                        │
//! │  │  owner_*        │        └─────────────────┘                        │
//! │  └─────────────────┘                                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ┌─────────────────┐                                                    │
//! │  │    Species      │  DOG | CAT | BIRD | FISH | REPTILE |              │
//! │  │  (closed enum)  │  SMALL_MAMMAL | OTHER                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A pet's `id` is assigned by the store on first save and never changes.
//! Vaccinations have no identity of their own; they live and die with
//! their pet.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Store-assigned pet identifier.
pub type PetId = i64;

// =============================================================================
// Species
// =============================================================================

/// The kind of animal a pet is.
///
/// Serialized as the upper-snake-case tag (`"SMALL_MAMMAL"`). Parsing is
/// lenient: `small-mammal`, `Small Mammal` and `small_mammal` all resolve to
/// [`Species::SmallMammal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Fish,
    Reptile,
    /// Rabbits, hamsters, guinea pigs and the like.
    SmallMammal,
    Other,
}

impl Species {
    /// Every species, in declaration order.
    pub const ALL: [Species; 7] = [
        Species::Dog,
        Species::Cat,
        Species::Bird,
        Species::Fish,
        Species::Reptile,
        Species::SmallMammal,
        Species::Other,
    ];

    /// Human-readable label ("Small Mammal").
    pub const fn display_name(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Bird => "Bird",
            Species::Fish => "Fish",
            Species::Reptile => "Reptile",
            Species::SmallMammal => "Small Mammal",
            Species::Other => "Other",
        }
    }

    /// Wire tag ("SMALL_MAMMAL").
    pub const fn code(&self) -> &'static str {
        match self {
            Species::Dog => "DOG",
            Species::Cat => "CAT",
            Species::Bird => "BIRD",
            Species::Fish => "FISH",
            Species::Reptile => "REPTILE",
            Species::SmallMammal => "SMALL_MAMMAL",
            Species::Other => "OTHER",
        }
    }

    /// All wire tags, for error messages.
    pub fn codes() -> Vec<String> {
        Species::ALL.iter().map(|s| s.code().to_string()).collect()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Species {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        Species::ALL
            .into_iter()
            .find(|species| species.code() == normalized)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "species".to_string(),
                allowed: Species::codes(),
            })
    }
}

impl<'de> Deserialize<'de> for Species {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Vaccination
// =============================================================================

/// One administered vaccine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vaccination {
    /// Vaccine name as recorded by the vet ("Rabies", "DHPP").
    pub name: String,

    /// Day the vaccine was given. Never in the future when validated.
    pub date_given: NaiveDate,
}

impl Vaccination {
    /// Creates a vaccination record.
    pub fn new(name: impl Into<String>, date_given: NaiveDate) -> Self {
        Vaccination {
            name: name.into(),
            date_given,
        }
    }

    /// The name in its case-folded search form.
    pub fn folded_name(&self) -> String {
        fold_vaccine_name(&self.name)
    }
}

/// Case-folds a vaccine name for searching.
///
/// Unicode-aware: `"ÉNTERITE"` and `"énterite"` fold to the same key.
pub fn fold_vaccine_name(name: &str) -> String {
    name.to_lowercase()
}

// =============================================================================
// Pet
// =============================================================================

/// A registered animal and its vaccination history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    /// Store-assigned identifier. `None` until the pet is first saved.
    pub id: Option<PetId>,

    /// Pet's name.
    pub name: String,

    pub species: Species,

    /// Free-text breed, if known.
    pub breed: Option<String>,

    pub owner_name: String,

    /// Ten-digit phone number.
    pub owner_contact: String,

    /// Where registration confirmations are sent.
    pub owner_email: String,

    /// Vaccination history. Order is preserved but carries no meaning.
    pub vaccinations: Vec<Vaccination>,
}

impl Pet {
    /// Returns true once the store has assigned an identifier.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns a copy carrying `id`, leaving every other field untouched.
    pub fn with_id(mut self, id: PetId) -> Self {
        self.id = Some(id);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
