use shared::Pet;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{form_data, form_message};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PetFormProps {
    pub api: ApiClient,
    /// Pet being edited; `None` creates a new listing
    #[prop_or_default]
    pub existing: Option<Pet>,
    pub on_saved: Callback<Pet>,
}

/// Create or edit a listing. When editing, untouched fields keep their
/// current values.
#[function_component(PetForm)]
pub fn pet_form(props: &PetFormProps) -> Html {
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let success = use_state(|| Option::<String>::None);

    let onsubmit = {
        let api = props.api.clone();
        let existing_id = props.existing.as_ref().map(|p| p.id.clone());
        let submitting = submitting.clone();
        let error = error.clone();
        let success = success.clone();
        let on_saved = props.on_saved.clone();
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
            let existing_id = existing_id.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let success = success.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                submitting.set(true);
                let result = match &existing_id {
                    Some(id) => api.update_pet(id, data).await,
                    None => api.create_pet(data).await,
                };
                match result {
                    Ok(pet) => {
                        error.set(None);
                        success.set(Some(format!("{} saved", pet.name)));
                        on_saved.emit(pet);
                    }
                    Err(e) => {
                        success.set(None);
                        error.set(Some(e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let value = |f: fn(&Pet) -> String| props.existing.as_ref().map(f).unwrap_or_default();
    let creating = props.existing.is_none();

    html! {
        <form class="panel pet-form" {onsubmit}>
            <h3>{if creating { "List a pet" } else { "Edit listing" }}</h3>
            {form_message(&error, &success)}
            <input name="name" placeholder="Name" value={value(|p| p.name.clone())} required={creating} />
            <input name="type" placeholder="Type (Dog, Cat...)" value={value(|p| p.pet_type.clone())} required={creating} />
            <input name="breed" placeholder="Breed" value={value(|p| p.breed.clone())} required={creating} />
            <input name="age" type="number" min="0" placeholder="Age" value={value(|p| p.age.to_string())} required={creating} />
            <input name="gender" placeholder="Gender" value={value(|p| p.gender.clone())} required={creating} />
            <input name="size" placeholder="Size" value={value(|p| p.size.clone().unwrap_or_default())} />
            <input name="location" placeholder="Location" value={value(|p| p.location.clone().unwrap_or_default())} />
            <textarea name="description" placeholder="Description" value={value(|p| p.description.clone().unwrap_or_default())} />
            <label>{"Photo (jpg or png) "}
                <input name="image" type="file" accept=".jpg,.jpeg,.png" required={creating} />
            </label>
            <button type="submit" disabled={*submitting}>{"Save"}</button>
        </form>
    }
}
