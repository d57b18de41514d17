pub mod adoption_form;
pub mod adoption_requests;
pub mod header;
pub mod my_applications;
pub mod my_listings;
pub mod onboarding_form;
pub mod pet_form;
pub mod pet_listings;
pub mod sign_in;
pub mod status_badge;

use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

/// Form contents of the form that fired `e`.
pub fn form_data(e: &SubmitEvent) -> Result<FormData, String> {
    let form: HtmlFormElement = e.target_unchecked_into();
    FormData::new_with_form(&form).map_err(|_| "Could not read the form".to_string())
}

/// Error or success banner above a form.
pub fn form_message(error: &Option<String>, success: &Option<String>) -> Html {
    html! {
        <>
            if let Some(error) = error {
                <div class="form-message error">{error}</div>
            }
            if let Some(success) = success {
                <div class="form-message success">{success}</div>
            }
        </>
    }
}
