use gloo::dialogs::alert;
use shared::Session;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub api: ApiClient,
    pub on_authenticated: Callback<Session>,
    pub on_show_signup: Callback<()>,
}

/// Entry page: password sign-in, Google popup sign-in and password reset.
/// Failures surface as blocking alerts and leave the form as it was.
#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let signing_in = use_state(|| false);
    let google_signing_in = use_state(|| false);

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
        let email = email.clone();
        let password = password.clone();
        let signing_in = signing_in.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let on_authenticated = on_authenticated.clone();
            let email = email.clone();
            let password = password.clone();
            let signing_in = signing_in.clone();

            spawn_local(async move {
                signing_in.set(true);
                match api.sign_in(&email, &password).await {
                    Ok(session) => on_authenticated.emit(session),
                    Err(message) => {
                        gloo::console::error!("sign-in failed:", message.clone());
                        alert(&format!("Login failed: {}", message));
                    }
                }
                signing_in.set(false);
            });
        })
    };

    let on_google = {
        let api = props.api.clone();
        let on_authenticated = props.on_authenticated.clone();
        let google_signing_in = google_signing_in.clone();

        Callback::from(move |_| {
            let api = api.clone();
            let on_authenticated = on_authenticated.clone();
            let google_signing_in = google_signing_in.clone();

            spawn_local(async move {
                google_signing_in.set(true);
                match api.sign_in_with_google().await {
                    Ok(session) => on_authenticated.emit(session),
                    Err(message) => {
                        gloo::console::error!("popup sign-in failed:", message.clone());
                        alert(&format!("Google sign-in failed: {}", message));
                    }
                }
                google_signing_in.set(false);
            });
        })
    };

    let on_forgot_password = {
        let api = props.api.clone();
        let email = email.clone();

        Callback::from(move |_| {
            let api = api.clone();
            let email = email.clone();

            spawn_local(async move {
                match api.send_password_reset(&email).await {
                    Ok(()) => alert("Password reset email sent. Check your inbox."),
                    Err(message) => alert(&message),
                }
            });
        })
    };

    let on_show_signup = {
        let on_show_signup = props.on_show_signup.clone();
        Callback::from(move |_| on_show_signup.emit(()))
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{"PennyFlow"}</h1>
                <h2>{"Sign In"}</h2>
                <form onsubmit={on_submit}>
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
                    <button type="submit" disabled={*signing_in}>
                        {if *signing_in { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <button
                    class="google-button"
                    onclick={on_google}
                    disabled={*google_signing_in}
                >
                    <i class="fab fa-google"></i>
                    {if *google_signing_in { " Signing in..." } else { " Sign in with Google" }}
                </button>
                <button class="link-button" onclick={on_forgot_password}>
                    {"Forgot password?"}
                </button>
                <p class="auth-switch">
                    {"Don't have an account? "}
                    <button class="link-button" onclick={on_show_signup}>
                        {"Sign Up"}
                    </button>
                </p>
            </div>
        </div>
    }
}
