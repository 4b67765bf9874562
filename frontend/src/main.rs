mod components;
mod hooks;
mod pages;
mod services;

use shared::{RecordKind, Session};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::Sidebar;
use pages::{DashboardPage, LoginPage, ProfilePage, RecordsPage, SignUpPage, SupportPage};
use services::ApiClient;

/// Top-level views. Everything except `Login` and `SignUp` requires a
/// session; without one the app falls back to the login view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Login,
    SignUp,
    Dashboard,
    Income,
    Expense,
    Profile,
    Support,
}

/// What actually gets rendered for a view/session pair.
#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Login,
    SignUp,
    Main(AppView, Session),
}

/// Single decision point for routing. The sign-up view never needs a
/// session; every other protected view without one resolves to the login
/// screen, which covers both deep navigation before sign-in and the
/// post-sign-out redirect.
fn screen_for(view: AppView, session: Option<Session>) -> Screen {
    match (view, session) {
        (AppView::SignUp, _) => Screen::SignUp,
        (AppView::Login, _) | (_, None) => Screen::Login,
        (view, Some(session)) => Screen::Main(view, session),
    }
}

#[function_component(App)]
fn app() -> Html {
    let api = use_memo((), |_| ApiClient::new_local());
    let session = use_state(|| Option::<Session>::None);
    let view = use_state(|| AppView::Login);

    let on_authenticated = {
        let session = session.clone();
        let view = view.clone();
        Callback::from(move |new_session: Session| {
            session.set(Some(new_session));
            view.set(AppView::Dashboard);
        })
    };
    let on_navigate = {
        let view = view.clone();
        Callback::from(move |target: AppView| view.set(target))
    };
    let on_show_signup = {
        let view = view.clone();
        Callback::from(move |_| view.set(AppView::SignUp))
    };
    let on_show_login = {
        let view = view.clone();
        Callback::from(move |_| view.set(AppView::Login))
    };
    let on_sign_out = {
        let api = api.clone();
        let session = session.clone();
        let view = view.clone();
        Callback::from(move |_| {
            let api = api.clone();
            let session = session.clone();
            let view = view.clone();
            spawn_local(async move {
                api.sign_out().await;
                session.set(None);
                view.set(AppView::Login);
            });
        })
    };

    match screen_for(*view, (*session).clone()) {
        Screen::Login => html! {
            <LoginPage
                api={(*api).clone()}
                on_authenticated={on_authenticated}
                on_show_signup={on_show_signup}
            />
        },
        Screen::SignUp => html! {
            <SignUpPage
                api={(*api).clone()}
                on_authenticated={on_authenticated}
                on_show_login={on_show_login}
            />
        },
        Screen::Main(authed_view, current) => {
            let page = match authed_view {
                AppView::Dashboard => html! {
                    <DashboardPage api={(*api).clone()} session={current.clone()} />
                },
                AppView::Income => html! {
                    <RecordsPage
                        api={(*api).clone()}
                        session={current.clone()}
                        kind={RecordKind::Income}
                    />
                },
                AppView::Expense => html! {
                    <RecordsPage
                        api={(*api).clone()}
                        session={current.clone()}
                        kind={RecordKind::Expense}
                    />
                },
                AppView::Profile => html! {
                    <ProfilePage api={(*api).clone()} session={current.clone()} />
                },
                AppView::Support => html! { <SupportPage /> },
                // screen_for never routes the auth views here.
                AppView::Login | AppView::SignUp => html! {},
            };
            html! {
                <div class="app-layout">
                    <Sidebar
                        active={authed_view}
                        display_name={api.display_name(&current)}
                        on_navigate={on_navigate}
                        on_sign_out={on_sign_out}
                    />
                    <main class="app-content">{page}</main>
                </div>
            }
        }
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session {
            user_id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            display_name: None,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_protected_views_resolve_to_login_without_session() {
        for view in [
            AppView::Dashboard,
            AppView::Income,
            AppView::Expense,
            AppView::Profile,
            AppView::Support,
        ] {
            assert_eq!(screen_for(view, None), Screen::Login);
            assert_eq!(
                screen_for(view, Some(test_session())),
                Screen::Main(view, test_session())
            );
        }
    }

    #[test]
    fn test_signup_reachable_without_session() {
        // Navigating to sign-up from the login screen happens while the
        // session is still empty; it must not fall back to login.
        assert_eq!(screen_for(AppView::SignUp, None), Screen::SignUp);
        assert_eq!(screen_for(AppView::SignUp, Some(test_session())), Screen::SignUp);
    }

    #[test]
    fn test_login_view_never_shows_a_main_screen() {
        assert_eq!(screen_for(AppView::Login, None), Screen::Login);
        assert_eq!(screen_for(AppView::Login, Some(test_session())), Screen::Login);
    }
}
