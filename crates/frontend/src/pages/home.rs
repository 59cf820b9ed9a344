use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::services::api::ApiService;
use crate::session::{SessionAction, SessionHandle};

#[function_component(Home)]
pub fn home() -> Html {
    let session = use_context::<SessionHandle>().expect("session context is set at the app root");
    let navigator = use_navigator().expect("home page is rendered inside a router");

    {
        let navigator = navigator.clone();
        use_effect_with(session.is_authenticated(), move |authenticated| {
            if !*authenticated {
                navigator.push(&Route::Login);
            }
            || ()
        });
    }

    // Refresh the cached profile whenever the token changes. A rejected
    // token means the session is stale, so drop it and bounce to login.
    {
        let session = session.clone();
        use_effect_with(session.token.clone(), move |token| {
            if let Some(token) = token.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    match ApiService::get_profile(&token).await {
                        Ok(profile) => session.dispatch(SessionAction::SetUser(profile)),
                        Err(e) => {
                            tracing::error!("Failed to fetch profile: {:?}", e);
                            session.dispatch(SessionAction::Clear);
                        }
                    }
                });
            }
            || ()
        });
    }

    html! {
        <div class="container">
            {
                if let Some(user) = &session.user {
                    html! {
                        <div class="profile-card">
                            if let Some(avatar) = user.avatar.clone() {
                                <img class="avatar" src={avatar} alt="Profile avatar" />
                            }
                            <h2>{ user.name.clone() }</h2>
                            <p class="email">{ user.email.clone() }</p>
                            <ul class="profile-details">
                                <li>
                                    <span class="label">{ "Provider" }</span>
                                    <span>{ user.provider.clone() }</span>
                                </li>
                                <li>
                                    <span class="label">{ "Email verified" }</span>
                                    <span>{ if user.is_email_verified { "Yes" } else { "No" } }</span>
                                </li>
                                <li>
                                    <span class="label">{ "Member since" }</span>
                                    <span>{ user.created_at.format("%B %e, %Y").to_string() }</span>
                                </li>
                            </ul>
                        </div>
                    }
                } else {
                    html! {
                        <div class="loading">
                            <div class="spinner"></div>
                        </div>
                    }
                }
            }
        </div>
    }
}
