use yew::prelude::*;

use crate::AppView;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub active: AppView,
    pub display_name: String,
    pub on_navigate: Callback<AppView>,
    pub on_sign_out: Callback<()>,
}

fn nav_items() -> [(AppView, &'static str, &'static str); 5] {
    [
        (AppView::Dashboard, "Dashboard", "fas fa-chart-pie"),
        (AppView::Income, "Income", "fas fa-arrow-trend-up"),
        (AppView::Expense, "Expenses", "fas fa-arrow-trend-down"),
        (AppView::Profile, "Profile", "fas fa-user"),
        (AppView::Support, "Support", "fas fa-circle-question"),
    ]
}

/// Navigation rail shown on every authenticated view.
#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_| on_sign_out.emit(()))
    };

    html! {
        <nav class="sidebar">
            <div class="sidebar-brand">
                <i class="fas fa-coins"></i>
                <span>{"PennyFlow"}</span>
            </div>
            <div class="sidebar-user">
                <span>{&props.display_name}</span>
            </div>
            <ul class="sidebar-nav">
                {for nav_items().into_iter().map(|(view, label, icon)| {
                    let is_active = view == props.active;
                    let on_navigate = props.on_navigate.clone();
                    let onclick = Callback::from(move |_| on_navigate.emit(view));
                    html! {
                        <li class={classes!("sidebar-item", is_active.then_some("active"))}>
                            <button {onclick}>
                                <i class={icon}></i>
                                <span>{label}</span>
                            </button>
                        </li>
                    }
                })}
            </ul>
            <button class="sidebar-signout" onclick={on_sign_out}>
                <i class="fas fa-right-from-bracket"></i>
                <span>{"Sign Out"}</span>
            </button>
        </nav>
    }
}
