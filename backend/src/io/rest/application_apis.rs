//! # REST API for Adoption Applications

use axum::{
    extract::{
        rejection::JsonRejection,
        multipart::MultipartRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::UpdateStatusRequest;
use tracing::info;

use super::auth::AuthUser;
use super::error::{api_validation_error, ApiError};
use super::mappers::ApplicationMapper;
use super::multipart::FormData;
use crate::domain::commands::applications::SubmitApplicationCommand;
use crate::domain::models::ApplicationId;
use crate::AppState;

/// Submit an adoption application with an identity document
pub async fn submit_application(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/applications - caller: {}", caller);

    let mut form = FormData::read(multipart).await?;
    let command = SubmitApplicationCommand {
        pet_id: form.text("petId"),
        claimed_rehomer_id: form.text("rehomerId"),
        full_name: form.text("fullName"),
        age: form.text("age"),
        contact_number: form.text("contactNumber"),
        address: form.text("address"),
        residence_type: form.text("residenceType"),
        household_size: form.text("householdSize"),
        has_other_pets: form.text("hasOtherPets"),
        has_kids: form.text("hasKids"),
        pet_sleep_location: form.text("petSleepLocation"),
        agreed_to_care: form.text("agreedToCare"),
        agreed_to_background_check: form.text("agreedToBackgroundCheck"),
        id_proof: form.file("idProof"),
    };

    let application = state.application_service.submit(&caller, command).await?;
    Ok((StatusCode::CREATED, Json(ApplicationMapper::to_dto(application))))
}

/// Applications the caller submitted
pub async fn list_my_applications(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/applications/my-applications - caller: {}", caller);

    let applications = state.application_service.list_mine(&caller).await?;
    Ok(Json(ApplicationMapper::to_dto_list(applications)))
}

/// Applications for the caller's pets
pub async fn list_received_applications(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/applications/received - caller: {}", caller);

    let applications = state.application_service.list_received(&caller).await?;
    Ok(Json(ApplicationMapper::to_dto_list(applications)))
}

/// Approve or reject a received application
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(application_id): Path<String>,
    request: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request.map_err(|e| api_validation_error(&e.body_text()))?;
    info!(
        "PATCH /api/applications/{}/status - caller: {}, status: {}",
        application_id, caller, request.status
    );

    let application = state
        .application_service
        .update_status(&caller, &ApplicationId::new(application_id), &request.status)
        .await?;
    Ok(Json(ApplicationMapper::to_dto(application)))
}

#[cfg(test)]
mod tests {
    use crate::domain::models::PetId;
    use crate::test_utils::{MultipartBody, TestEnvironment};
    use axum::http::{Method, StatusCode};

    fn application_form(pet_id: &PetId) -> MultipartBody {
        MultipartBody::new()
            .text("petId", pet_id.as_str())
            .text("rehomerId", "user_r")
            .text("fullName", "Alex Applicant")
            .text("age", "29")
            .text("contactNumber", "555-0100")
            .text("address", "1 Main St")
            .text("residenceType", "Flat")
            .text("householdSize", "2")
            .text("hasOtherPets", "false")
            .text("hasKids", "false")
            .text("petSleepLocation", "Indoors")
            .text("agreedToCare", "true")
            .text("agreedToBackgroundCheck", "true")
            .file("idProof", "passport.pdf", "application/pdf", b"%PDF-1.4")
    }

    #[tokio::test]
    async fn test_submit_requires_file_and_agreements() {
        let env = TestEnvironment::new().await;
        let rehomer = env.rehomer("user_r").await;
        let pet = env.insert_pet("Buddy", &rehomer).await;
        let token = env.token("user_a");

        let no_file = MultipartBody::new()
            .text("petId", pet.id.as_str())
            .text("fullName", "Alex Applicant")
            .text("agreedToCare", "true")
            .text("agreedToBackgroundCheck", "true");
        let (status, _) = env
            .send_form(Method::POST, "/api/applications", &token, no_file)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let refused = application_form(&pet.id).text("agreedToCare", "false");
        let (status, body) = env
            .send_form(Method::POST, "/api/applications", &token, refused)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");

        let (_, body) = env
            .get("/api/applications/my-applications", Some(&token))
            .await;
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_submit_with_json_body_is_validation_error() {
        let env = TestEnvironment::new().await;

        let (status, body) = env
            .send_json(
                Method::POST,
                "/api/applications",
                &env.token("user_a"),
                serde_json::json!({ "petId": "x" }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_submit_for_unknown_pet_is_404() {
        let env = TestEnvironment::new().await;
        let (status, body) = env
            .send_form(
                Method::POST,
                "/api/applications",
                &env.token("user_a"),
                application_form(&PetId::new("missing")),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_status_update_rejects_pending_and_unknown_values() {
        let env = TestEnvironment::new().await;
        let rehomer = env.rehomer("user_r").await;
        let pet = env.insert_pet("Buddy", &rehomer).await;
        let application = env.insert_application("user_a", &pet.id).await;
        let path = format!("/api/applications/{}/status", application.id);
        let token = env.token("user_r");

        for status in ["Pending", "Adopted"] {
            let (code, _) = env
                .send_json(Method::PATCH, &path, &token, serde_json::json!({ "status": status }))
                .await;
            assert_eq!(code, StatusCode::BAD_REQUEST, "{status}");
        }
        let (code, _) = env
            .send_json(Method::PATCH, &path, &token, serde_json::json!({ "state": "Approved" }))
            .await;
        assert_eq!(code, StatusCode::BAD_REQUEST);

        let (_, body) = env.get("/api/applications/received", Some(&token)).await;
        assert_eq!(body[0]["status"], "Pending");

        let (code, _) = env
            .send_json(
                Method::PATCH,
                &path,
                &env.token("user_a"),
                serde_json::json!({ "status": "Approved" }),
            )
            .await;
        assert_eq!(code, StatusCode::FORBIDDEN);

        let (code, _) = env
            .send_json(
                Method::PATCH,
                "/api/applications/missing/status",
                &token,
                serde_json::json!({ "status": "Approved" }),
            )
            .await;
        assert_eq!(code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_adoption_flow_end_to_end() {
        let env = TestEnvironment::new().await;
        env.rehomer("user_r").await;
        let rehomer_token = env.token("user_r");
        let applicant_token = env.token("user_a");

        let pet_form = MultipartBody::new()
            .text("name", "Buddy")
            .text("type", "Dog")
            .text("breed", "Labrador")
            .text("age", "2")
            .text("gender", "Male")
            .file("image", "buddy.jpg", "image/jpeg", b"jpeg-bytes");
        let (status, pet) = env
            .send_form(Method::POST, "/api/pets", &rehomer_token, pet_form)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let pet_id = PetId::new(pet["_id"].as_str().unwrap_or_default());

        let (_, listed) = env.get("/api/pets", None).await;
        assert_eq!(listed[0]["_id"], pet["_id"]);
        assert_eq!(listed[0]["rehomerId"], "user_r");

        let (status, application) = env
            .send_form(
                Method::POST,
                "/api/applications",
                &applicant_token,
                application_form(&pet_id),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(application["status"], "Pending");
        assert_eq!(application["rehomerId"], "user_r");

        let (_, received) = env
            .get("/api/applications/received", Some(&rehomer_token))
            .await;
        assert_eq!(received.as_array().map(Vec::len), Some(1));

        let path = format!(
            "/api/applications/{}/status",
            application["_id"].as_str().unwrap_or_default()
        );
        let (status, approved) = env
            .send_json(
                Method::PATCH,
                &path,
                &rehomer_token,
                serde_json::json!({ "status": "Approved" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(approved["status"], "Approved");
        assert_eq!(approved["pet"]["name"], "Buddy");

        let (status, _) = env
            .delete(&format!("/api/pets/{}", pet_id), &rehomer_token)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, mine) = env
            .get("/api/applications/my-applications", Some(&applicant_token))
            .await;
        assert_eq!(mine.as_array().map(Vec::len), Some(0));
        let (_, received) = env
            .get("/api/applications/received", Some(&rehomer_token))
            .await;
        assert_eq!(received.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_orphaned_application_shows_null_pet() {
        let env = TestEnvironment::new().await;
        env.insert_orphan_application("user_a", &PetId::new("deleted")).await;

        let (status, body) = env
            .get("/api/applications/my-applications", Some(&env.token("user_a")))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert!(body[0]["pet"].is_null());
        assert_eq!(body[0]["petId"], "deleted");
    }
}
