use shared::{Pet, PetFilter};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::form_data;
use crate::services::api::ApiClient;
use crate::services::format::age_label;

#[derive(Properties, PartialEq)]
pub struct PetListingsProps {
    pub api: ApiClient,
    pub signed_in: bool,
    pub on_adopt: Callback<Pet>,
}

fn filter_from_form(e: &SubmitEvent) -> PetFilter {
    let Ok(data) = form_data(e) else {
        return PetFilter::default();
    };
    let field = |name: &str| data.get(name).as_string().filter(|v| !v.trim().is_empty());
    PetFilter {
        pet_type: field("type"),
        breed: field("breed"),
        max_age: field("maxAge").and_then(|v| v.trim().parse().ok()),
        location: field("location"),
    }
}

#[function_component(PetListings)]
pub fn pet_listings(props: &PetListingsProps) -> Html {
    let pets = use_state(Vec::<Pet>::new);
    let filter = use_state(PetFilter::default);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    {
        let api = props.api.clone();
        let pets = pets.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((*filter).clone(), move |filter| {
            let filter = filter.clone();
            spawn_local(async move {
                loading.set(true);
                match api.list_pets(&filter).await {
                    Ok(list) => {
                        pets.set(list);
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e)),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let onsubmit = {
        let filter = filter.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            filter.set(filter_from_form(&e));
        })
    };

    html! {
        <section class="pet-listings">
            <h2>{"Pets looking for a home"}</h2>
            <form class="filters" {onsubmit}>
                <select name="type">
                    <option value="">{"Any type"}</option>
                    <option value="Dog">{"Dog"}</option>
                    <option value="Cat">{"Cat"}</option>
                    <option value="Bird">{"Bird"}</option>
                    <option value="Other">{"Other"}</option>
                </select>
                <input name="breed" placeholder="Breed" />
                <input name="maxAge" type="number" min="0" placeholder="Max age" />
                <input name="location" placeholder="Location" />
                <button type="submit">{"Search"}</button>
            </form>
            if let Some(error) = (*error).as_ref() {
                <div class="form-message error">{error}</div>
            }
            if *loading {
                <p class="muted">{"Loading pets..."}</p>
            } else if pets.is_empty() {
                <p class="muted">{"No pets match your search."}</p>
            } else {
                <div class="pet-grid">
                    {for pets.iter().map(|pet| {
                        let on_adopt = props.on_adopt.clone();
                        let selected = pet.clone();
                        html! {
                            <article class="pet-card" key={pet.id.clone()}>
                                if let Some(image) = &pet.image {
                                    <img src={image.clone()} alt={pet.name.clone()} />
                                }
                                <h3>{&pet.name}</h3>
                                <p>{format!("{} · {} · {}", pet.breed, pet.gender, age_label(pet.age))}</p>
                                if let Some(location) = &pet.location {
                                    <p class="muted">{location}</p>
                                }
                                if let Some(description) = &pet.description {
                                    <p>{description}</p>
                                }
                                if props.signed_in {
                                    <button onclick={Callback::from(move |_| on_adopt.emit(selected.clone()))}>
                                        {"Adopt"}
                                    </button>
                                }
                            </article>
                        }
                    })}
                </div>
            }
        </section>
    }
}
