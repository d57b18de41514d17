use shared::{AdoptionApplication, ApplicationStatus};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::status_badge::StatusBadge;
use crate::services::api::ApiClient;
use crate::services::format::{format_date, pet_summary};

#[derive(Properties, PartialEq)]
pub struct AdoptionRequestsProps {
    pub api: ApiClient,
}

/// Applications received for the caller's pets, with approve/reject actions
/// while they are pending.
#[function_component(AdoptionRequests)]
pub fn adoption_requests(props: &AdoptionRequestsProps) -> Html {
    let applications = use_state(Vec::<AdoptionApplication>::new);
    let error = use_state(|| Option::<String>::None);

    {
        let api = props.api.clone();
        let applications = applications.clone();
        let error = error.clone();
        use_effect_with(props.api.clone(), move |_| {
            spawn_local(async move {
                match api.received_applications().await {
                    Ok(list) => applications.set(list),
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    let decide = {
        let api = props.api.clone();
        let applications = applications.clone();
        let error = error.clone();
        Callback::from(move |(id, status): (String, ApplicationStatus)| {
            let api = api.clone();
            let applications = applications.clone();
            let error = error.clone();
            spawn_local(async move {
                match api.update_application_status(&id, status).await {
                    Ok(updated) => {
                        let list = applications
                            .iter()
                            .cloned()
                            .map(|a| if a.id == updated.id { updated.clone() } else { a })
                            .collect();
                        applications.set(list);
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    html! {
        <section class="adoption-requests">
            <h2>{"Adoption requests"}</h2>
            if let Some(error) = (*error).as_ref() {
                <div class="form-message error">{error}</div>
            }
            if applications.is_empty() {
                <p class="muted">{"No one has applied for your pets yet."}</p>
            }
            {for applications.iter().map(|application| {
                let approve = {
                    let decide = decide.clone();
                    let id = application.id.clone();
                    Callback::from(move |_| decide.emit((id.clone(), ApplicationStatus::Approved)))
                };
                let reject = {
                    let decide = decide.clone();
                    let id = application.id.clone();
                    Callback::from(move |_| decide.emit((id.clone(), ApplicationStatus::Rejected)))
                };
                html! {
                    <div class="application-row" key={application.id.clone()}>
                        <strong>{pet_summary(application.pet.as_ref())}</strong>
                        {" "}
                        <StatusBadge status={application.status} />
                        <p>{format!(
                            "{} ({}), {} · {} in household · {}",
                            application.full_name,
                            application.age,
                            application.residence_type.as_str(),
                            application.household_size,
                            application.contact_number,
                        )}</p>
                        <p class="muted">{format!(
                            "Other pets: {} · Kids: {} · Sleeps {} · Received {}",
                            if application.has_other_pets { "yes" } else { "no" },
                            if application.has_kids { "yes" } else { "no" },
                            application.pet_sleep_location.as_str().to_lowercase(),
                            format_date(&application.created_at),
                        )}</p>
                        <a href={application.id_proof_url.clone()} target="_blank">{"View ID proof"}</a>
                        if application.status == ApplicationStatus::Pending {
                            <div>
                                <button onclick={approve}>{"Approve"}</button>
                                <button onclick={reject}>{"Reject"}</button>
                            </div>
                        }
                    </div>
                }
            })}
        </section>
    }
}
