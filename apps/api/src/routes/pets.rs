//! # Pet Routes
//!
//! ```text
//! GET    /api/pets                     list
//! POST   /api/pets                     create          201
//! GET    /api/pets/{id}                fetch one       404 when absent
//! PUT    /api/pets/{id}                replace         404 when absent
//! DELETE /api/pets/{id}                delete          204, no body
//! GET    /api/pets/vaccinated/{name}   vaccine search  case-insensitive
//! ```
//!
//! Request bodies go through validation before they reach the service;
//! every body returned is wrapped in the `{ message, data }` envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use petvax_core::dto::{ApiResponse, PetRequest, PetResponse};
use petvax_core::{mapper, validation, Pet, PetId};
use tracing::debug;

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam};
use crate::state::AppState;

/// Routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route(
            "/pets/{id}",
            get(get_pet).put(update_pet).delete(delete_pet),
        )
        .route("/pets/vaccinated/{name}", get(pets_by_vaccination))
}

/// Reference day for vaccination dates.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validates a request body and maps it to an unsaved pet.
fn to_valid_pet(request: PetRequest) -> Result<Pet, ApiError> {
    let valid = validation::validate_pet_request(request, today())?;
    Ok(mapper::to_domain(valid))
}

fn to_responses(pets: Vec<Pet>) -> Vec<PetResponse> {
    pets.into_iter().map(PetResponse::from).collect()
}

type Envelope<T> = Json<ApiResponse<T>>;

async fn list_pets(State(state): State<AppState>) -> Result<Envelope<Vec<PetResponse>>, ApiError> {
    let pets = state.service.get_all().await?;
    let message = format!("Successfully retrieved all {} pets details", pets.len());
    Ok(Json(ApiResponse::with_data(message, to_responses(pets))))
}

async fn create_pet(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PetRequest>,
) -> Result<(StatusCode, Envelope<PetResponse>), ApiError> {
    let pet = to_valid_pet(request)?;
    let created = state.service.create(pet).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(
            "Successfully registered new Pet",
            PetResponse::from(created),
        )),
    ))
}

async fn get_pet(
    State(state): State<AppState>,
    PathParam(id): PathParam<PetId>,
) -> Result<Envelope<PetResponse>, ApiError> {
    let pet = mapper::to_response(state.service.get_by_id(id).await?)
        .ok_or(ApiError::NotFound(id))?;

    Ok(Json(ApiResponse::with_data(
        format!("Fetched Pet details with pet Id: {id}"),
        pet,
    )))
}

async fn update_pet(
    State(state): State<AppState>,
    PathParam(id): PathParam<PetId>,
    JsonBody(request): JsonBody<PetRequest>,
) -> Result<Envelope<PetResponse>, ApiError> {
    let replacement = to_valid_pet(request)?;
    let updated = state.service.update(id, replacement).await?;

    Ok(Json(ApiResponse::with_data(
        "Pet updated successfully",
        PetResponse::from(updated),
    )))
}

async fn delete_pet(
    State(state): State<AppState>,
    PathParam(id): PathParam<PetId>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn pets_by_vaccination(
    State(state): State<AppState>,
    PathParam(name): PathParam<String>,
) -> Result<Envelope<Vec<PetResponse>>, ApiError> {
    debug!(vaccine = %name, "pets_by_vaccination");
    let pets = state.service.get_by_vaccination_name(&name).await?;

    Ok(Json(ApiResponse::with_data(
        format!("Fetched all pet details with vaccination: {name}"),
        to_responses(pets),
    )))
}
