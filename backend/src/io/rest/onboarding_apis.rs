//! # REST API for Onboarding

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Json},
};
use shared::{OnboardingResponse, ProfileResponse};
use tracing::info;

use super::auth::AuthUser;
use super::error::ApiError;
use super::multipart::FormData;
use crate::domain::commands::onboarding::OnboardingCommand;
use crate::AppState;

/// Current profile metadata of the caller
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/onboarding - caller: {}", caller);

    let metadata = state.onboarding_service.get_profile(&caller).await?;
    Ok(Json(ProfileResponse { metadata }))
}

/// Pick a role, location and (for rehomers) upload a certificate
pub async fn complete_onboarding(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/onboarding - caller: {}", caller);

    let mut form = FormData::read(multipart).await?;
    let command = OnboardingCommand {
        role: form.text("role"),
        location: form.text("location"),
        address: form.text("address"),
        certificate: form.file("certificate"),
    };

    let metadata = state.onboarding_service.complete(&caller, command).await?;
    Ok(Json(OnboardingResponse {
        success: true,
        metadata,
    }))
}
