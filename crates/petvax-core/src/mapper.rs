//! # Mapper
//!
//! Conversions between wire DTOs and domain types.
//!
//! Every function here is total: validation already happened, so nothing
//! can fail.

use crate::dto::{PetResponse, ValidPetRequest, VaccinationDto};
use crate::types::{Pet, Vaccination};

/// Builds an unsaved [`Pet`] from a validated request.
///
/// An absent vaccination list becomes an empty one.
pub fn to_domain(request: ValidPetRequest) -> Pet {
    Pet {
        id: None,
        name: request.name,
        species: request.species,
        breed: request.breed,
        owner_name: request.owner_name,
        owner_contact: request.owner_contact,
        owner_email: request.owner_email,
        vaccinations: request.vaccines.unwrap_or_default(),
    }
}

/// Exposes a pet to clients. `None` maps to `None`.
pub fn to_response(pet: Option<Pet>) -> Option<PetResponse> {
    pet.map(PetResponse::from)
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        PetResponse {
            id: pet.id,
            name: pet.name,
            species: pet.species,
            breed: pet.breed,
            owner_name: pet.owner_name,
            owner_contact: pet.owner_contact,
            owner_email: pet.owner_email,
            vaccines: pet
                .vaccinations
                .into_iter()
                .map(VaccinationDto::from)
                .collect(),
        }
    }
}

impl From<Vaccination> for VaccinationDto {
    fn from(vaccination: Vaccination) -> Self {
        VaccinationDto {
            name: vaccination.name,
            date_given: vaccination.date_given,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
