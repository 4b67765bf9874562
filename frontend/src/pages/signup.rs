use gloo::dialogs::alert;
use shared::Session;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct SignUpPageProps {
    pub api: ApiClient,
    pub on_authenticated: Callback<Session>,
    pub on_show_login: Callback<()>,
}

/// Account creation: full name, email and password, or the Google popup.
#[function_component(SignUpPage)]
pub fn sign_up_page(props: &SignUpPageProps) -> Html {
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);

    let on_full_name = {
        let full_name = full_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            full_name.set(input.value());
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let api = props.api.clone();
        let on_authenticated = props.on_authenticated.clone();
        let full_name = full_name.clone();
        let email = email.clone();
        let password = password.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let on_authenticated = on_authenticated.clone();
            let full_name = full_name.clone();
            let email = email.clone();
            let password = password.clone();
            let submitting = submitting.clone();

            spawn_local(async move {
                submitting.set(true);
                match api.sign_up(&full_name, &email, &password).await {
                    Ok(session) => on_authenticated.emit(session),
                    Err(message) => {
                        gloo::console::error!("sign-up failed:", message.clone());
                        alert(&format!("Sign up failed: {}", message));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let on_google = {
        let api = props.api.clone();
        let on_authenticated = props.on_authenticated.clone();

        Callback::from(move |_| {
            let api = api.clone();
            let on_authenticated = on_authenticated.clone();

            spawn_local(async move {
                match api.sign_in_with_google().await {
                    Ok(session) => on_authenticated.emit(session),
                    Err(message) => alert(&format!("Google sign-in failed: {}", message)),
                }
            });
        })
    };

    let on_show_login = {
        let on_show_login = props.on_show_login.clone();
        Callback::from(move |_| on_show_login.emit(()))
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{"PennyFlow"}</h1>
                <h2>{"Create Account"}</h2>
                <form onsubmit={on_submit}>
                    <input
                        type="text"
                        placeholder="Full name"
                        value={(*full_name).clone()}
                        oninput={on_full_name}
                        required=true
                    />
                    <input
                        type="email"
                        placeholder="Email"
                        value={(*email).clone()}
                        oninput={on_email}
                        required=true
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        value={(*password).clone()}
                        oninput={on_password}
                        required=true
                    />
                    <button type="submit" disabled={*submitting}>
                        {if *submitting { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <button class="google-button" onclick={on_google}>
                    <i class="fab fa-google"></i>
                    {" Sign up with Google"}
                </button>
                <p class="auth-switch">
                    {"Already have an account? "}
                    <button class="link-button" onclick={on_show_login}>
                        {"Sign In"}
                    </button>
                </p>
            </div>
        </div>
    }
}
