use shared::{nav_items, NavItem, Pet, ProfileMetadata};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::adoption_form::AdoptionForm;
use components::adoption_requests::AdoptionRequests;
use components::header::Header;
use components::my_applications::MyApplications;
use components::my_listings::MyListings;
use components::onboarding_form::OnboardingForm;
use components::pet_listings::PetListings;
use components::sign_in::SignIn;
use hooks::use_session::use_session;

#[function_component(App)]
fn app() -> Html {
    let session = use_session();
    let current = use_state(|| NavItem::Browse);
    let adopting = use_state(|| Option::<Pet>::None);

    let signed_in = session.state.signed_in();
    let role = session.state.role();

    // Views the caller lost access to (sign out, role change) fall back to browsing
    let view = if nav_items(signed_in, role).contains(&*current) {
        *current
    } else {
        NavItem::Browse
    };

    let on_navigate = {
        let current = current.clone();
        let adopting = adopting.clone();
        Callback::from(move |item: NavItem| {
            adopting.set(None);
            current.set(item);
        })
    };

    let on_adopt = {
        let adopting = adopting.clone();
        Callback::from(move |pet: Pet| adopting.set(Some(pet)))
    };

    let close_adoption = {
        let adopting = adopting.clone();
        Callback::from(move |_: ()| adopting.set(None))
    };

    let on_submitted = {
        let adopting = adopting.clone();
        let current = current.clone();
        Callback::from(move |_: ()| {
            adopting.set(None);
            current.set(NavItem::MyApplications);
        })
    };

    let on_onboarded = {
        let refresh_profile = session.actions.refresh_profile.clone();
        let current = current.clone();
        Callback::from(move |_: ProfileMetadata| {
            refresh_profile.emit(());
            current.set(NavItem::Browse);
        })
    };

    let api = session.api.clone();
    let body = match (&*adopting, view) {
        (Some(pet), _) if signed_in => html! {
            <AdoptionForm
                api={api.clone()}
                pet={pet.clone()}
                {on_submitted}
                on_cancel={close_adoption}
            />
        },
        (_, NavItem::Browse) => html! {
            <PetListings api={api.clone()} {signed_in} {on_adopt} />
        },
        (_, NavItem::Onboarding) => html! {
            <OnboardingForm api={api.clone()} on_complete={on_onboarded} />
        },
        (_, NavItem::MyApplications) => html! { <MyApplications api={api.clone()} /> },
        (_, NavItem::MyListings) => html! { <MyListings api={api.clone()} /> },
        (_, NavItem::AdoptionRequests) => html! { <AdoptionRequests api={api.clone()} /> },
    };

    html! {
        <div class="app">
            <Header
                {signed_in}
                {role}
                current={view}
                {on_navigate}
                on_sign_out={session.actions.sign_out.clone()}
            />
            <main>
                if !signed_in {
                    <SignIn on_sign_in={session.actions.sign_in.clone()} />
                } else if session.state.loading {
                    <p class="muted">{"Loading your profile..."}</p>
                } else if role.is_none() && view == NavItem::Browse {
                    <p class="notice">{"Finish setting up your account under Get Started to apply or list pets."}</p>
                }
                {body}
            </main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
