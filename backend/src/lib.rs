//! # Snuffle Backend
//!
//! Contains all non-UI logic for the Snuffle pet-adoption marketplace.
//!
//! The backend is layered:
//! ```text
//! IO Layer (REST API, multipart parsing, auth extractor)
//!     ↓
//! Domain Layer (pet, application, onboarding and maintenance services)
//!     ↓
//! Storage Layer (SQLite)        External (identity provider, media host)
//! ```
//!
//! Authentication and per-user profile metadata belong to an external
//! identity provider, uploaded files to an external media host. Both are
//! reached through the narrow traits in [`external`].

pub mod config;
pub mod domain;
pub mod error;
pub mod external;
pub mod io;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{ApplicationService, MaintenanceService, OnboardingService, PetService};
use crate::external::{
    HttpProfileStore, InMemoryProfileStore, JwtVerifier, LocalMediaStore, MediaStore,
    ProfileStore, TokenVerifier,
};
use crate::storage::{
    ApplicationRepository, ApplicationStorage, DbConnection, PetRepository, PetStorage,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub pet_service: PetService,
    pub application_service: ApplicationService,
    pub onboarding_service: OnboardingService,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

/// Everything a binary needs besides the HTTP router.
pub struct Backend {
    pub state: AppState,
    pub maintenance_service: MaintenanceService,
}

/// Wire services together on top of already constructed stores.
pub fn build_state(
    pets: Arc<dyn PetStorage>,
    applications: Arc<dyn ApplicationStorage>,
    profiles: Arc<dyn ProfileStore>,
    media: Arc<dyn MediaStore>,
    token_verifier: Arc<dyn TokenVerifier>,
) -> AppState {
    let pet_service = PetService::new(pets.clone(), profiles.clone(), media.clone());
    let application_service = ApplicationService::new(applications, pets, media.clone());
    let onboarding_service = OnboardingService::new(profiles, media);

    AppState {
        pet_service,
        application_service,
        onboarding_service,
        token_verifier,
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<Backend> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;
    let pets: Arc<dyn PetStorage> = Arc::new(PetRepository::new(db.clone()));
    let applications: Arc<dyn ApplicationStorage> = Arc::new(ApplicationRepository::new(db));

    info!("Setting up external services");
    let profiles: Arc<dyn ProfileStore> = match &config.profile_api {
        Some(api) => Arc::new(HttpProfileStore::new(&api.base_url, &api.api_key)?),
        None => {
            warn!("No profile API configured, profile metadata is kept in memory");
            Arc::new(InMemoryProfileStore::new())
        }
    };
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        &config.media_dir,
        &config.media_base_url,
    )?);
    let token_verifier: Arc<dyn TokenVerifier> =
        Arc::new(JwtVerifier::from_config(&config.auth).context("configure token verification")?);

    info!("Setting up domain model");
    let maintenance_service = MaintenanceService::new(applications.clone());
    let state = build_state(pets, applications, profiles, media, token_verifier);

    Ok(Backend {
        state,
        maintenance_service,
    })
}

/// Routes under `/api`, without CORS or static file serving.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/pets",
            get(io::rest::pet_apis::list_pets).post(io::rest::pet_apis::create_pet),
        )
        .route("/pets/my-listings", get(io::rest::pet_apis::list_my_pets))
        .route(
            "/pets/:id",
            get(io::rest::pet_apis::get_pet)
                .patch(io::rest::pet_apis::update_pet)
                .delete(io::rest::pet_apis::delete_pet),
        )
        .route(
            "/applications",
            post(io::rest::application_apis::submit_application),
        )
        .route(
            "/applications/my-applications",
            get(io::rest::application_apis::list_my_applications),
        )
        .route(
            "/applications/received",
            get(io::rest::application_apis::list_received_applications),
        )
        .route(
            "/applications/:id/status",
            patch(io::rest::application_apis::update_status),
        )
        .route(
            "/onboarding",
            get(io::rest::onboarding_apis::get_profile)
                .post(io::rest::onboarding_apis::complete_onboarding),
        )
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    // CORS setup to allow frontend to make requests
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin: {}", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", api_router())
        .nest_service("/media", ServeDir::new(&config.media_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::DEFAULT_CORS_ORIGIN;
    use crate::test_utils::{MultipartBody, TestEnvironment};

    #[tokio::test]
    async fn test_oversized_upload_is_413() {
        let env = TestEnvironment::new().await;
        env.rehomer("user_r").await;
        let form = MultipartBody::new()
            .text("name", "Buddy")
            .text("type", "Dog")
            .text("breed", "Beagle")
            .text("age", "2")
            .text("gender", "Male")
            .file("image", "buddy.png", "image/png", &[0u8; 4096]);
        let request =
            TestEnvironment::form_request(Method::POST, "/api/pets", &env.token("user_r"), form);

        let (status, body) =
            TestEnvironment::call_router(env.server_router(1024), request).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "payload_too_large");
        let (_, listed) = env.get("/api/pets", None).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let env = TestEnvironment::new().await;
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/health")
            .header(header::ORIGIN, DEFAULT_CORS_ORIGIN)
            .body(Body::empty())
            .expect("request");

        let response = env
            .server_router(1024)
            .oneshot(request)
            .await
            .expect("Router failed");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some(DEFAULT_CORS_ORIGIN)
        );
    }

    #[tokio::test]
    async fn test_media_root_is_served() {
        let env = TestEnvironment::new().await;
        let folder = env.media_dir().join("snuffle-pets");
        std::fs::create_dir_all(&folder).expect("create folder");
        std::fs::write(folder.join("buddy.png"), b"png-bytes").expect("write media");
        let request = Request::builder()
            .uri("/media/snuffle-pets/buddy.png")
            .body(Body::empty())
            .expect("request");

        let response = env
            .server_router(1024)
            .oneshot(request)
            .await
            .expect("Router failed");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        assert_eq!(&bytes[..], b"png-bytes");

        let (status, _) = TestEnvironment::call_router(
            env.server_router(1024),
            Request::builder()
                .uri("/media/snuffle-pets/missing.png")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
