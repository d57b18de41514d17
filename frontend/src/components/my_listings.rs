use shared::Pet;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::pet_form::PetForm;
use crate::services::api::ApiClient;
use crate::services::format::{age_label, format_date};

#[derive(Properties, PartialEq)]
pub struct MyListingsProps {
    pub api: ApiClient,
}

#[function_component(MyListings)]
pub fn my_listings(props: &MyListingsProps) -> Html {
    let pets = use_state(Vec::<Pet>::new);
    let editing = use_state(|| Option::<Pet>::None);
    let message = use_state(|| Option::<String>::None);
    let refresh_trigger = use_state(|| 0u32);

    {
        let api = props.api.clone();
        let pets = pets.clone();
        let message = message.clone();
        use_effect_with(*refresh_trigger, move |_| {
            spawn_local(async move {
                match api.list_my_pets().await {
                    Ok(list) => pets.set(list),
                    Err(e) => message.set(Some(e)),
                }
            });
            || ()
        });
    }

    let refresh = {
        let refresh_trigger = refresh_trigger.clone();
        let editing = editing.clone();
        Callback::from(move |_: Pet| {
            editing.set(None);
            refresh_trigger.set(*refresh_trigger + 1);
        })
    };

    let on_delete = {
        let api = props.api.clone();
        let message = message.clone();
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |pet: Pet| {
            let api = api.clone();
            let message = message.clone();
            let refresh_trigger = refresh_trigger.clone();
            spawn_local(async move {
                match api.delete_pet(&pet.id).await {
                    Ok(response) => {
                        message.set(Some(format!(
                            "{} removed along with {} applications",
                            pet.name, response.deleted_applications
                        )));
                        refresh_trigger.set(*refresh_trigger + 1);
                    }
                    Err(e) => message.set(Some(e)),
                }
            });
        })
    };

    html! {
        <section class="my-listings">
            <h2>{"My listings"}</h2>
            if let Some(message) = (*message).as_ref() {
                <div class="form-message">{message}</div>
            }
            <PetForm
                api={props.api.clone()}
                existing={(*editing).clone()}
                on_saved={refresh}
                key={(*editing).as_ref().map(|p| p.id.clone()).unwrap_or_default()}
            />
            if pets.is_empty() {
                <p class="muted">{"You have not listed any pets yet."}</p>
            }
            <div class="pet-grid">
                {for pets.iter().map(|pet| {
                    let edit_pet = pet.clone();
                    let delete_pet = pet.clone();
                    let editing = editing.clone();
                    let on_delete = on_delete.clone();
                    html! {
                        <article class="pet-card" key={pet.id.clone()}>
                            if let Some(image) = &pet.image {
                                <img src={image.clone()} alt={pet.name.clone()} />
                            }
                            <h3>{&pet.name}</h3>
                            <p>{format!("{} {} · {}", pet.breed, pet.pet_type, age_label(pet.age))}</p>
                            <p class="muted">{format!("Listed {}", format_date(&pet.created_at))}</p>
                            <button onclick={Callback::from(move |_| editing.set(Some(edit_pet.clone())))}>
                                {"Edit"}
                            </button>
                            <button onclick={Callback::from(move |_| on_delete.emit(delete_pet.clone()))}>
                                {"Delete"}
                            </button>
                        </article>
                    }
                })}
            </div>
        </section>
    }
}
