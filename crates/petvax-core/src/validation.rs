//! # Validation Module
//!
//! Request validation for PetVax.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON extraction (apps/api)                                   │
//! │  ├── Syntax, field types, species tag                                  │
//! │  └── Failure → 400 "Malformed JSON request..."                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, formats, dates                          │
//! │  └── Failure → 400 "Validation failed" + field map                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Individual validators stop at the first broken rule for their field.
//! [`validate_pet_request`] runs all of them and collects every failure.

use chrono::NaiveDate;
use email_address::EmailAddress;

use crate::dto::{PetRequest, ValidPetRequest, VaccinationRequest};
use crate::error::{ValidationError, ValidationErrors};
use crate::types::{Species, Vaccination};
use crate::{CONTACT_DIGITS, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, length-limited name (pet name, owner name).
///
/// ## Rules
/// - Must be present and not blank
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use petvax_core::validation::validate_name;
///
/// assert!(validate_name("name", Some("Rex")).is_ok());
/// assert!(validate_name("name", Some("   ")).is_err());
/// assert!(validate_name("name", Some("A".repeat(51).as_str())).is_err());
/// ```
pub fn validate_name(field: &str, value: Option<&str>) -> ValidationResult<()> {
    let value = validate_required(field, value)?;

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates that a value is present and not blank.
///
/// ## Returns
/// The value as given (not trimmed).
pub fn validate_required<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// Validates an owner contact number.
///
/// ## Rules
/// - Must be present
/// - Exactly [`CONTACT_DIGITS`] ASCII digits, nothing else
///
/// ## Example
/// ```rust
/// use petvax_core::validation::validate_contact;
///
/// assert!(validate_contact(Some("1234567890")).is_ok());
/// assert!(validate_contact(Some("12345")).is_err());
/// assert!(validate_contact(Some("123-456-7890")).is_err());
/// ```
pub fn validate_contact(value: Option<&str>) -> ValidationResult<()> {
    let value = validate_required("ownerContact", value)?;

    if value.len() != CONTACT_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "ownerContact".to_string(),
            reason: format!("must be exactly {} digits", CONTACT_DIGITS),
        });
    }

    Ok(())
}

/// Validates an owner email address.
///
/// ## Rules
/// - Must be present and not blank
/// - RFC 5322 `local@domain` syntax (dot-atom local part: no leading,
///   trailing or doubled dots, no specials such as `,` `<` `>`)
/// - No whitespace
/// - Domain is dot-separated host labels of ASCII letters, digits and
///   inner hyphens
///
/// ## Example
/// ```rust
/// use petvax_core::validation::validate_email;
///
/// assert!(validate_email(Some("alice@example.com")).is_ok());
/// assert!(validate_email(Some("alice")).is_err());
/// assert!(validate_email(Some("alice@")).is_err());
/// assert!(validate_email(Some("a..b@x.com")).is_err());
/// ```
pub fn validate_email(value: Option<&str>) -> ValidationResult<()> {
    let value = validate_required("ownerEmail", value)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "ownerEmail".to_string(),
        reason: "must be a well-formed email address".to_string(),
    };

    if value.chars().any(char::is_whitespace) || !EmailAddress::is_valid(value) {
        return Err(invalid());
    }

    let (_, domain) = value.rsplit_once('@').ok_or_else(invalid)?;
    if !domain.split('.').all(is_host_label) {
        return Err(invalid());
    }

    Ok(())
}

fn is_host_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Validates that a species was supplied.
///
/// Unknown tags never reach this point; they fail JSON extraction.
pub fn validate_species(value: Option<Species>) -> ValidationResult<Species> {
    value.ok_or_else(|| ValidationError::Required {
        field: "species".to_string(),
    })
}

// =============================================================================
// Vaccination Validators
// =============================================================================

/// Validates the day a vaccine was given.
///
/// ## Rules
/// - Must be present
/// - Must not be after `today`
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use petvax_core::validation::validate_date_given;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert!(validate_date_given("dateGiven", Some(today), today).is_ok());
/// assert!(validate_date_given("dateGiven", today.succ_opt(), today).is_err());
/// ```
pub fn validate_date_given(
    field: &str,
    value: Option<NaiveDate>,
    today: NaiveDate,
) -> ValidationResult<NaiveDate> {
    let date = value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })?;

    if date > today {
        return Err(ValidationError::InFuture {
            field: field.to_string(),
        });
    }

    Ok(date)
}

/// Validates one vaccination entry at position `index`.
///
/// Both fields are checked; every failure is recorded in `errors`.
fn validate_vaccination(
    index: usize,
    request: VaccinationRequest,
    today: NaiveDate,
    errors: &mut ValidationErrors,
) -> Option<Vaccination> {
    let name_field = format!("vaccines[{index}].name");
    let date_field = format!("vaccines[{index}].dateGiven");

    let name = validate_required(&name_field, request.name.as_deref()).map(|_| ());
    let date = validate_date_given(&date_field, request.date_given, today);

    match (name, date) {
        (Ok(()), Ok(date)) => Some(Vaccination::new(request.name.unwrap_or_default(), date)),
        (name, date) => {
            errors.check(name);
            errors.check(date.map(|_| ()));
            None
        }
    }
}

// =============================================================================
// Request Validator
// =============================================================================

/// Validates a whole pet request, collecting every failure.
///
/// `today` is the reference day for vaccination dates; callers pass the
/// current local date.
///
/// ## Returns
/// A [`ValidPetRequest`] when every rule holds, otherwise all failures.
pub fn validate_pet_request(
    request: PetRequest,
    today: NaiveDate,
) -> Result<ValidPetRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check(validate_name("name", request.name.as_deref()));
    let species = validate_species(request.species);
    if let Err(e) = &species {
        errors.push(e.clone());
    }
    errors.check(validate_name("ownerName", request.owner_name.as_deref()));
    errors.check(validate_contact(request.owner_contact.as_deref()));
    errors.check(validate_email(request.owner_email.as_deref()));

    let vaccines = request.vaccines.map(|list| {
        list.into_iter()
            .enumerate()
            .filter_map(|(index, v)| validate_vaccination(index, v, today, &mut errors))
            .collect::<Vec<_>>()
    });

    match species {
        Ok(species) if errors.is_empty() => Ok(ValidPetRequest {
            name: request.name.unwrap_or_default(),
            species,
            breed: request.breed,
            owner_name: request.owner_name.unwrap_or_default(),
            owner_contact: request.owner_contact.unwrap_or_default(),
            owner_email: request.owner_email.unwrap_or_default(),
            vaccines,
        }),
        _ => Err(errors),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
