use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    AdoptionApplication, ApplicationStatus, DeletePetResponse, ErrorResponse,
    OnboardingResponse, Pet, PetFilter, ProfileResponse, UpdateStatusRequest,
};
use web_sys::FormData;

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            token: None,
        }
    }

    /// Same client, sending `token` as bearer credentials
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, String> {
        if response.ok() {
            return response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e));
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(error_message(status, &body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        self.send(Request::get(&self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, String> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::read(response).await
    }

    async fn send_form<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        form: FormData,
    ) -> Result<T, String> {
        let response = self
            .authorized(builder)
            .body(form)
            .map_err(|e| format!("Failed to build request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::read(response).await
    }

    /// Public catalogue, optionally filtered
    pub async fn list_pets(&self, filter: &PetFilter) -> Result<Vec<Pet>, String> {
        self.send(Request::get(&self.url("/pets")).query(filter.query_pairs()))
            .await
    }

    pub async fn list_my_pets(&self) -> Result<Vec<Pet>, String> {
        self.get("/pets/my-listings").await
    }

    /// Create a listing from a form with the pet fields and an `image` file
    pub async fn create_pet(&self, form: FormData) -> Result<Pet, String> {
        self.send_form(Request::post(&self.url("/pets")), form).await
    }

    pub async fn update_pet(&self, pet_id: &str, form: FormData) -> Result<Pet, String> {
        self.send_form(Request::patch(&self.url(&format!("/pets/{}", pet_id))), form)
            .await
    }

    pub async fn delete_pet(&self, pet_id: &str) -> Result<DeletePetResponse, String> {
        self.send(Request::delete(&self.url(&format!("/pets/{}", pet_id))))
            .await
    }

    /// Submit an application form including the `idProof` file
    pub async fn submit_application(&self, form: FormData) -> Result<AdoptionApplication, String> {
        self.send_form(Request::post(&self.url("/applications")), form)
            .await
    }

    pub async fn my_applications(&self) -> Result<Vec<AdoptionApplication>, String> {
        self.get("/applications/my-applications").await
    }

    pub async fn received_applications(&self) -> Result<Vec<AdoptionApplication>, String> {
        self.get("/applications/received").await
    }

    pub async fn update_application_status(
        &self,
        application_id: &str,
        status: ApplicationStatus,
    ) -> Result<AdoptionApplication, String> {
        let request = UpdateStatusRequest {
            status: status.as_str().to_string(),
        };
        let response = self
            .authorized(Request::patch(
                &self.url(&format!("/applications/{}/status", application_id)),
            ))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::read(response).await
    }

    pub async fn get_profile(&self) -> Result<ProfileResponse, String> {
        self.get("/onboarding").await
    }

    pub async fn complete_onboarding(&self, form: FormData) -> Result<OnboardingResponse, String> {
        self.send_form(Request::post(&self.url("/onboarding")), form)
            .await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Message to show for a failed response: the server's `error` field when the
/// body is a JSON error, otherwise the status and raw text.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => error.error,
        Err(_) if body.trim().is_empty() => format!("Server error {}", status),
        Err(_) => format!("Server error {}: {}", status, body.trim()),
    }
}
