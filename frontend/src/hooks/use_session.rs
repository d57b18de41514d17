use shared::{ProfileMetadata, Role};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::session::Session;

#[derive(Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub profile: ProfileMetadata,
    pub loading: bool,
}

impl SessionState {
    pub fn signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.role
    }
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    pub sign_in: Callback<Session>,
    pub sign_out: Callback<()>,
    pub refresh_profile: Callback<()>,
}

pub struct UseSessionResult {
    pub state: SessionState,
    pub api: ApiClient,
    pub actions: UseSessionActions,
}

/// Stored session, the caller's profile metadata, and an API client carrying
/// the session token.
#[hook]
pub fn use_session() -> UseSessionResult {
    let session = use_state(Session::load);
    let profile = use_state(ProfileMetadata::default);
    let loading = use_state(|| false);

    let api = ApiClient::new().with_token(session.as_ref().map(|s| s.token.clone()));

    let refresh_profile = {
        let api = api.clone();
        let profile = profile.clone();
        let loading = loading.clone();
        let signed_in = session.is_some();

        use_callback((api.clone(), signed_in), move |_, _| {
            let api = api.clone();
            let profile = profile.clone();
            let loading = loading.clone();
            if !signed_in {
                profile.set(ProfileMetadata::default());
                return;
            }

            spawn_local(async move {
                loading.set(true);
                match api.get_profile().await {
                    Ok(response) => profile.set(response.metadata),
                    Err(e) => gloo::console::error!("Failed to load profile:", e),
                }
                loading.set(false);
            });
        })
    };

    {
        let refresh_profile = refresh_profile.clone();
        use_effect_with(session.clone(), move |_| {
            refresh_profile.emit(());
            || ()
        });
    }

    let sign_in = {
        let session = session.clone();
        Callback::from(move |new_session: Session| {
            new_session.save();
            session.set(Some(new_session));
        })
    };

    let sign_out = {
        let session = session.clone();
        let profile = profile.clone();
        Callback::from(move |_| {
            Session::clear();
            session.set(None);
            profile.set(ProfileMetadata::default());
        })
    };

    UseSessionResult {
        state: SessionState {
            session: (*session).clone(),
            profile: (*profile).clone(),
            loading: *loading,
        },
        api,
        actions: UseSessionActions {
            sign_in,
            sign_out,
            refresh_profile,
        },
    }
}
