//! # REST API for Pet Listings
//!
//! Public catalogue plus owner-only management of listings.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::QueryRejection,
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{DeletePetResponse, PetFilter};
use tracing::info;

use super::auth::AuthUser;
use super::error::{api_validation_error, ApiError};
use super::mappers::PetMapper;
use super::multipart::FormData;
use crate::domain::commands::pets::{CreatePetCommand, UpdatePetCommand};
use crate::domain::models::PetId;
use crate::AppState;

/// List all pets, newest first
pub async fn list_pets(
    State(state): State<AppState>,
    filter: Result<Query<PetFilter>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(filter) = filter.map_err(|e| api_validation_error(&e.body_text()))?;
    info!("GET /api/pets - filter: {:?}", filter);

    let pets = state.pet_service.list_pets(&filter).await?;
    Ok(Json(PetMapper::to_dto_list(pets)))
}

/// List the caller's own listings
pub async fn list_my_pets(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/pets/my-listings - caller: {}", caller);

    let pets = state.pet_service.list_my_pets(&caller).await?;
    Ok(Json(PetMapper::to_dto_list(pets)))
}

/// Get a pet the caller owns
pub async fn get_pet(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(pet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/pets/{} - caller: {}", pet_id, caller);

    let pet = state
        .pet_service
        .get_owned_pet(&caller, &PetId::new(pet_id))
        .await?;
    Ok(Json(PetMapper::to_dto(pet)))
}

/// List a new pet (rehomers only)
pub async fn create_pet(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/pets - caller: {}", caller);

    let mut form = FormData::read(multipart).await?;
    let command = CreatePetCommand {
        name: form.text("name"),
        pet_type: form.text("type"),
        breed: form.text("breed"),
        age: form.text("age"),
        gender: form.text("gender"),
        size: form.text("size"),
        location: form.text("location"),
        description: form.text("description"),
        image: form.file("image"),
    };

    let pet = state.pet_service.create_pet(&caller, command).await?;
    Ok((StatusCode::CREATED, Json(PetMapper::to_dto(pet))))
}

/// Update any subset of a listing's fields
pub async fn update_pet(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(pet_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PATCH /api/pets/{} - caller: {}", pet_id, caller);

    let mut form = FormData::read(multipart).await?;
    let command = UpdatePetCommand {
        name: form.text("name"),
        pet_type: form.text("type"),
        breed: form.text("breed"),
        age: form.text("age"),
        gender: form.text("gender"),
        size: form.text("size"),
        location: form.text("location"),
        description: form.text("description"),
        image: form.file("image"),
    };

    let pet = state
        .pet_service
        .update_pet(&caller, &PetId::new(pet_id), command)
        .await?;
    Ok(Json(PetMapper::to_dto(pet)))
}

/// Delete a listing and every application for it
pub async fn delete_pet(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(pet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/pets/{} - caller: {}", pet_id, caller);

    let result = state
        .pet_service
        .delete_pet(&caller, &PetId::new(pet_id))
        .await?;
    Ok(Json(DeletePetResponse {
        message: "Pet and associated applications deleted".to_string(),
        deleted_applications: result.deleted_applications,
    }))
}
