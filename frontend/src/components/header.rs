use shared::{nav_items, NavItem, Role};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub signed_in: bool,
    pub role: Option<Role>,
    pub current: NavItem,
    pub on_navigate: Callback<NavItem>,
    pub on_sign_out: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let items = nav_items(props.signed_in, props.role);

    html! {
        <header>
            <span class="brand">{"🐾 Snuffle"}</span>
            <nav>
                {for items.into_iter().map(|item| {
                    let on_navigate = props.on_navigate.clone();
                    let class = if item == props.current { "active" } else { "" };
                    html! {
                        <button {class} onclick={Callback::from(move |_| on_navigate.emit(item))}>
                            {item.label()}
                        </button>
                    }
                })}
            </nav>
            if props.signed_in {
                <button class="sign-out" onclick={props.on_sign_out.reform(|_| ())}>
                    {"Sign out"}
                </button>
            }
        </header>
    }
}
