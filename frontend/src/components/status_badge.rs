use shared::ApplicationStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: ApplicationStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let class = match props.status {
        ApplicationStatus::Pending => "status-badge pending",
        ApplicationStatus::Approved => "status-badge approved",
        ApplicationStatus::Rejected => "status-badge rejected",
    };
    html! { <span {class}>{props.status.as_str()}</span> }
}
