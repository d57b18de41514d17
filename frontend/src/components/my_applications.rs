use shared::AdoptionApplication;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::status_badge::StatusBadge;
use crate::services::api::ApiClient;
use crate::services::format::{format_date, pet_summary};

#[derive(Properties, PartialEq)]
pub struct MyApplicationsProps {
    pub api: ApiClient,
}

#[function_component(MyApplications)]
pub fn my_applications(props: &MyApplicationsProps) -> Html {
    let applications = use_state(Vec::<AdoptionApplication>::new);
    let error = use_state(|| Option::<String>::None);

    {
        let api = props.api.clone();
        let applications = applications.clone();
        let error = error.clone();
        use_effect_with(props.api.clone(), move |_| {
            spawn_local(async move {
                match api.my_applications().await {
                    Ok(list) => applications.set(list),
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    html! {
        <section class="my-applications">
            <h2>{"My applications"}</h2>
            if let Some(error) = (*error).as_ref() {
                <div class="form-message error">{error}</div>
            }
            if applications.is_empty() {
                <p class="muted">{"You have not applied for any pets yet."}</p>
            }
            {for applications.iter().map(|application| html! {
                <div class="application-row" key={application.id.clone()}>
                    <strong>{pet_summary(application.pet.as_ref())}</strong>
                    {" "}
                    <StatusBadge status={application.status} />
                    <p class="muted">{format!("Submitted {}", format_date(&application.created_at))}</p>
                </div>
            })}
        </section>
    }
}
