//! Shared fixtures for unit and router tests.

use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use shared::{ApplicationStatus, ProfileMetadata, ResidenceType, Role, SleepLocation};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::{AppConfig, AuthConfig, AuthKey, DEFAULT_CORS_ORIGIN};
use crate::domain::models::{AdoptionApplication, ApplicationId, Pet, PetId, UserId};
use crate::external::{
    InMemoryProfileStore, JwtVerifier, LocalMediaStore, ProfileStore, Upload,
};
use crate::storage::{ApplicationRepository, ApplicationStorage, DbConnection, PetRepository, PetStorage};
use crate::{api_router, build_state, create_router, AppState};

const TEST_SECRET: &str = "snuffle-test-secret";
const MULTIPART_BOUNDARY: &str = "snuffle-test-boundary";

pub fn sample_pet(name: &str, rehomer: &str) -> Pet {
    let now = crate::domain::now();
    Pet {
        id: PetId::generate(),
        name: name.to_string(),
        pet_type: "Dog".to_string(),
        breed: "Beagle".to_string(),
        age: 2,
        gender: "Male".to_string(),
        size: Some("Medium".to_string()),
        location: Some("Austin, TX".to_string()),
        image: Some("http://localhost:5001/media/snuffle-pets/sample.png".to_string()),
        description: Some("Friendly and house trained".to_string()),
        rehomer_id: UserId::new(rehomer),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_application(applicant: &str, pet_id: &PetId) -> AdoptionApplication {
    let now = crate::domain::now();
    AdoptionApplication {
        id: ApplicationId::generate(),
        applicant_id: UserId::new(applicant),
        full_name: "Alex Applicant".to_string(),
        age: 29,
        contact_number: "555-0100".to_string(),
        address: "1 Main St".to_string(),
        residence_type: ResidenceType::House,
        id_proof_url: "http://localhost:5001/media/snuffle-id-proofs/sample.pdf".to_string(),
        household_size: 3,
        has_other_pets: false,
        has_kids: true,
        pet_sleep_location: SleepLocation::Indoors,
        pet_id: pet_id.clone(),
        rehomer_id: UserId::new("user_r"),
        agreed_to_care: true,
        agreed_to_background_check: true,
        status: ApplicationStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

pub fn png_upload(field: &str) -> Upload {
    Upload {
        field: field.to_string(),
        file_name: Some("photo.png".to_string()),
        content_type: Some("image/png".to_string()),
        bytes: b"png-bytes".to_vec(),
    }
}

pub fn pdf_upload(field: &str) -> Upload {
    Upload {
        field: field.to_string(),
        file_name: Some("document.pdf".to_string()),
        content_type: Some("application/pdf".to_string()),
        bytes: b"%PDF-1.4".to_vec(),
    }
}

/// Hand-built `multipart/form-data` body.
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// A fully wired backend on an in-memory database, a temporary media root and
/// an in-memory profile store.
pub struct TestEnvironment {
    pub state: AppState,
    pub pets: Arc<dyn PetStorage>,
    pub applications: ApplicationRepository,
    pub profiles: Arc<InMemoryProfileStore>,
    media: TempDir,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let pets: Arc<dyn PetStorage> = Arc::new(PetRepository::new(db.clone()));
        let applications = ApplicationRepository::new(db);
        let profiles = Arc::new(InMemoryProfileStore::new());
        let media = tempfile::tempdir().expect("Failed to create media dir");
        let media_store = LocalMediaStore::new(media.path(), "http://localhost:5001/media")
            .expect("Failed to create media store");
        let verifier = JwtVerifier::from_config(&AuthConfig {
            key: AuthKey::Secret(TEST_SECRET.to_string()),
            issuer: None,
        })
        .expect("Failed to create verifier");

        let state = build_state(
            pets.clone(),
            Arc::new(applications.clone()),
            profiles.clone(),
            Arc::new(media_store),
            Arc::new(verifier),
        );

        Self {
            state,
            pets,
            applications,
            profiles,
            media,
        }
    }

    pub fn media_dir(&self) -> &Path {
        self.media.path()
    }

    /// HS256 token for `user`, valid for an hour
    pub fn token(&self, user: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs()
            + 3600;
        encode(
            &Header::default(),
            &serde_json::json!({ "sub": user, "exp": exp }),
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("Failed to sign token")
    }

    async fn onboard(&self, user: &str, role: Role) -> UserId {
        let user = UserId::new(user);
        let metadata = ProfileMetadata {
            role: Some(role),
            location: Some("Austin, TX".to_string()),
            address: None,
            certificate_url: None,
        };
        self.profiles
            .set_profile(&user, &metadata)
            .await
            .expect("Failed to set profile");
        user
    }

    pub async fn rehomer(&self, user: &str) -> UserId {
        self.onboard(user, Role::Rehomer).await
    }

    pub async fn customer(&self, user: &str) -> UserId {
        self.onboard(user, Role::Customer).await
    }

    pub async fn insert_pet(&self, name: &str, rehomer: &UserId) -> Pet {
        let pet = sample_pet(name, rehomer.as_str());
        self.pets.store_pet(&pet).await.expect("Failed to store pet");
        pet
    }

    /// Stored through the conditional insert, so the rehomer comes from the pet.
    pub async fn insert_application(&self, applicant: &str, pet_id: &PetId) -> AdoptionApplication {
        let application = sample_application(applicant, pet_id);
        let stored = self
            .applications
            .store_application_for_existing_pet(&application)
            .await
            .expect("Failed to store application");
        assert!(stored, "pet {pet_id} does not exist");
        self.applications
            .get_application(&application.id)
            .await
            .expect("Failed to load application")
            .expect("application exists")
            .application
    }

    pub async fn insert_orphan_application(&self, applicant: &str, pet_id: &PetId) {
        let application = sample_application(applicant, pet_id);
        self.applications
            .store_application_unchecked(&application)
            .await
            .expect("Failed to store orphan");
    }

    pub fn router(&self) -> Router {
        Router::new()
            .nest("/api", api_router())
            .with_state(self.state.clone())
    }

    /// Server configuration pointing at this environment's media root
    pub fn app_config(&self, max_upload_bytes: usize) -> AppConfig {
        AppConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind addr"),
            database_url: "sqlite::memory:".to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            media_dir: self.media_dir().to_path_buf(),
            media_base_url: "http://localhost:5001/media".to_string(),
            max_upload_bytes,
            auth: AuthConfig {
                key: AuthKey::Secret(TEST_SECRET.to_string()),
                issuer: None,
            },
            profile_api: None,
        }
    }

    /// The full server router: CORS, body limit and `/media` included
    pub fn server_router(&self, max_upload_bytes: usize) -> Router {
        create_router(self.state.clone(), &self.app_config(max_upload_bytes))
            .expect("Failed to build server router")
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        Self::call_router(self.router(), request).await
    }

    pub async fn call_router(
        router: Router,
        request: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.call(builder.body(Body::empty()).expect("request")).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request");
        self.call(request).await
    }

    pub async fn send_form(
        &self,
        method: Method,
        path: &str,
        token: &str,
        form: MultipartBody,
    ) -> (StatusCode, serde_json::Value) {
        self.call(Self::form_request(method, path, token, form)).await
    }

    pub fn form_request(
        method: Method,
        path: &str,
        token: &str,
        form: MultipartBody,
    ) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(form.finish()))
            .expect("request")
    }

    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.call(request).await
    }
}
