use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct SignInProps {
    pub on_sign_in: Callback<Session>,
}

/// Accepts the bearer token issued by the identity provider.
#[function_component(SignIn)]
pub fn sign_in(props: &SignInProps) -> Html {
    let input = use_node_ref();
    let error = use_state(|| Option::<String>::None);

    let onsubmit = {
        let input = input.clone();
        let error = error.clone();
        let on_sign_in = props.on_sign_in.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let raw = input
                .cast::<HtmlInputElement>()
                .map(|el| el.value())
                .unwrap_or_default();
            match Session::from_token(&raw) {
                Some(session) => {
                    error.set(None);
                    on_sign_in.emit(session);
                }
                None => error.set(Some("Paste the token from your sign-in provider".to_string())),
            }
        })
    };

    html! {
        <form class="panel sign-in" {onsubmit}>
            <h2>{"Sign in"}</h2>
            <input ref={input} type="password" placeholder="Access token" />
            if let Some(error) = (*error).as_ref() {
                <div class="form-message error">{error}</div>
            }
            <button type="submit">{"Sign in"}</button>
        </form>
    }
}
