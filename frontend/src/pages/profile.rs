use gloo::dialogs::alert;
use shared::{Session, UpdateProfileRequest};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ProfilePageProps {
    pub api: ApiClient,
    pub session: Session,
}

/// Profile view and editor. A user without a stored document still gets a
/// usable page from the session fallback.
#[function_component(ProfilePage)]
pub fn profile_page(props: &ProfilePageProps) -> Html {
    let profile = use_state({
        let api = props.api.clone();
        let session = props.session.clone();
        move || api.get_profile(&session)
    });
    let editing = use_state(|| false);
    let full_name = use_state(String::new);
    let bio = use_state(String::new);
    let profile_image = use_state(String::new);

    let on_begin_edit = {
        let profile = profile.clone();
        let editing = editing.clone();
        let full_name = full_name.clone();
        let bio = bio.clone();
        let profile_image = profile_image.clone();
        Callback::from(move |_| {
            full_name.set(profile.full_name.clone());
            bio.set(profile.bio.clone());
            profile_image.set(profile.profile_image.clone());
            editing.set(true);
        })
    };
    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(false))
    };

    let on_full_name = {
        let full_name = full_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            full_name.set(input.value());
        })
    };
    let on_bio = {
        let bio = bio.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            bio.set(input.value());
        })
    };
    let on_image = {
        let profile_image = profile_image.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            profile_image.set(input.value());
        })
    };

    let on_save = {
        let api = props.api.clone();
        let session = props.session.clone();
        let profile = profile.clone();
        let editing = editing.clone();
        let full_name = full_name.clone();
        let bio = bio.clone();
        let profile_image = profile_image.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = UpdateProfileRequest {
                full_name: (*full_name).clone(),
                bio: (*bio).clone(),
                profile_image: (*profile_image).clone(),
            };
            match api.update_profile(&session, request) {
                Ok(updated) => {
                    profile.set(updated);
                    editing.set(false);
                }
                Err(message) => alert(&format!("Profile update failed: {}", message)),
            }
        })
    };

    html! {
        <div class="profile-page">
            <h2>{"Profile"}</h2>
            {if *editing {
                html! {
                    <form class="profile-form" onsubmit={on_save}>
                        <div class="form-row">
                            <label>{"Full name"}</label>
                            <input
                                type="text"
                                value={(*full_name).clone()}
                                oninput={on_full_name}
                            />
                        </div>
                        <div class="form-row">
                            <label>{"Bio"}</label>
                            <input type="text" value={(*bio).clone()} oninput={on_bio} />
                        </div>
                        <div class="form-row">
                            <label>{"Profile image URL"}</label>
                            <input
                                type="text"
                                value={(*profile_image).clone()}
                                oninput={on_image}
                            />
                        </div>
                        <div class="form-actions">
                            <button type="submit">{"Save"}</button>
                            <button type="button" class="form-cancel" onclick={on_cancel}>
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                }
            } else {
                html! {
                    <div class="profile-card">
                        <img
                            class="profile-image"
                            src={profile.profile_image.clone()}
                            alt="Profile"
                        />
                        <h3>{if profile.full_name.is_empty() {
                            profile.email.clone()
                        } else {
                            profile.full_name.clone()
                        }}</h3>
                        <p class="profile-email">{&profile.email}</p>
                        {if !profile.bio.is_empty() {
                            html! { <p class="profile-bio">{&profile.bio}</p> }
                        } else {
                            html! {}
                        }}
                        <button onclick={on_begin_edit}>{"Edit Profile"}</button>
                    </div>
                }
            }}
        </div>
    }
}
