use shared::Pet;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{form_data, form_message};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AdoptionFormProps {
    pub api: ApiClient,
    pub pet: Pet,
    pub on_submitted: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(AdoptionForm)]
pub fn adoption_form(props: &AdoptionFormProps) -> Html {
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let onsubmit = {
        let api = props.api.clone();
        let pet = props.pet.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let on_submitted = props.on_submitted.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let data = match form_data(&e) {
                Ok(data) => data,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            if data.get("agreedToCare").is_null() || data.get("agreedToBackgroundCheck").is_null() {
                error.set(Some("Please accept both agreements".to_string()));
                return;
            }
            let _ = data.set_with_str("petId", &pet.id);
            let _ = data.set_with_str("rehomerId", &pet.rehomer_id);

            let api = api.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let on_submitted = on_submitted.clone();
            spawn_local(async move {
                submitting.set(true);
                match api.submit_application(data).await {
                    Ok(_) => {
                        error.set(None);
                        on_submitted.emit(());
                    }
                    Err(e) => error.set(Some(e)),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <form class="panel adoption-form" {onsubmit}>
            <h2>{format!("Adopt {}", props.pet.name)}</h2>
            {form_message(&error, &None)}
            <input name="fullName" placeholder="Full name" required=true />
            <input name="age" type="number" min="0" placeholder="Your age" required=true />
            <input name="contactNumber" placeholder="Contact number" required=true />
            <textarea name="address" placeholder="Address" required=true />
            <label>{"Residence "}
                <select name="residenceType">
                    <option value="House">{"House"}</option>
                    <option value="Flat">{"Flat"}</option>
                    <option value="Hostel">{"Hostel"}</option>
                </select>
            </label>
            <input name="householdSize" type="number" min="1" placeholder="People in household" required=true />
            <label><input name="hasOtherPets" type="checkbox" />{" I have other pets"}</label>
            <label><input name="hasKids" type="checkbox" />{" There are kids at home"}</label>
            <label>{"The pet will sleep "}
                <select name="petSleepLocation">
                    <option value="Indoors">{"Indoors"}</option>
                    <option value="Outdoors">{"Outdoors"}</option>
                </select>
            </label>
            <label>{"ID proof (jpg, png or pdf) "}
                <input name="idProof" type="file" accept=".jpg,.jpeg,.png,.pdf" required=true />
            </label>
            <label><input name="agreedToCare" type="checkbox" />{" I agree to care for this pet"}</label>
            <label><input name="agreedToBackgroundCheck" type="checkbox" />{" I agree to a background check"}</label>
            <div>
                <button type="submit" disabled={*submitting}>
                    {if *submitting { "Submitting..." } else { "Submit application" }}
                </button>
                <button type="button" onclick={props.on_cancel.reform(|_| ())}>{"Cancel"}</button>
            </div>
        </form>
    }
}
