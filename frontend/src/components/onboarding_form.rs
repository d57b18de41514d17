use shared::ProfileMetadata;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{form_data, form_message};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct OnboardingFormProps {
    pub api: ApiClient,
    pub on_complete: Callback<ProfileMetadata>,
}

#[function_component(OnboardingForm)]
pub fn onboarding_form(props: &OnboardingFormProps) -> Html {
    let role = use_state(|| "customer".to_string());
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let onchange_role = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            role.set(select.value());
        })
    };

    let onsubmit = {
        let api = props.api.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = match form_data(&e) {
                Ok(data) => data,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };

            let api = api.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let on_complete = on_complete.clone();
            spawn_local(async move {
                submitting.set(true);
                match api.complete_onboarding(data).await {
                    Ok(response) => {
                        error.set(None);
                        on_complete.emit(response.metadata);
                    }
                    Err(e) => error.set(Some(e)),
                }
                submitting.set(false);
            });
        })
    };

    let is_rehomer = *role == "rehomer";

    html! {
        <form class="panel onboarding-form" {onsubmit}>
            <h2>{"Welcome to Snuffle"}</h2>
            <p class="muted">{"Tell us how you want to use Snuffle."}</p>
            {form_message(&error, &None)}
            <label>{"I want to "}
                <select name="role" onchange={onchange_role}>
                    <option value="customer" selected={!is_rehomer}>{"adopt a pet"}</option>
                    <option value="rehomer" selected={is_rehomer}>{"rehome pets"}</option>
                </select>
            </label>
            <input name="location" placeholder="City" required=true />
            if is_rehomer {
                <textarea name="address" placeholder="Address" />
                <label>{"Certificate (jpg, png or pdf) "}
                    <input name="certificate" type="file" accept=".jpg,.jpeg,.png,.pdf" required=true />
                </label>
            }
            <button type="submit" disabled={*submitting}>{"Continue"}</button>
        </form>
    }
}
