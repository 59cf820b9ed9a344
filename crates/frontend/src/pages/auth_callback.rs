//! Landing page for the server's OAuth redirect. Pulls the token out of the
//! query string, caches it, fetches the profile, then moves on.

use gloo::timers::callback::Timeout;
use serde::Deserialize;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::services::api::ApiService;
use crate::session::{SessionAction, SessionHandle};

const SUCCESS_REDIRECT_MS: u32 = 2_000;
const FAILURE_REDIRECT_MS: u32 = 3_000;

/// Query parameters the backend appends to the redirect.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct CallbackQuery {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub auth_error: Option<String>,
}

#[derive(Clone, PartialEq)]
enum CallbackStatus {
    Processing,
    Success,
    Failed(String),
}

async fn resolve_login(session: &SessionHandle, query: &CallbackQuery) -> Result<(), String> {
    if query.auth_error.is_some() {
        return Err("Authentication failed".to_string());
    }

    let token = query
        .token
        .clone()
        .ok_or_else(|| "No authentication token received".to_string())?;

    session.dispatch(SessionAction::SignIn(token.clone()));

    let profile = ApiService::get_profile(&token).await?;
    session.dispatch(SessionAction::SetUser(profile));

    Ok(())
}

#[function_component(AuthCallback)]
pub fn auth_callback() -> Html {
    let session = use_context::<SessionHandle>().expect("session context is set at the app root");
    let navigator = use_navigator().expect("callback page is rendered inside a router");
    let location = use_location().expect("callback page is rendered inside a router");
    let status = use_state(|| CallbackStatus::Processing);

    let query = location.query::<CallbackQuery>().unwrap_or_default();

    {
        let session = session.clone();
        let navigator = navigator.clone();
        let status = status.clone();

        use_effect_with(query, move |query| {
            let query = query.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match resolve_login(&session, &query).await {
                    Ok(()) => {
                        status.set(CallbackStatus::Success);
                        Timeout::new(SUCCESS_REDIRECT_MS, move || {
                            navigator.push(&Route::Home);
                        })
                        .forget();
                    }
                    Err(message) => {
                        tracing::error!("Auth callback error: {}", message);
                        status.set(CallbackStatus::Failed(message));
                        Timeout::new(FAILURE_REDIRECT_MS, move || {
                            navigator.push(&Route::Login);
                        })
                        .forget();
                    }
                }
            });
            || ()
        });
    }

    html! {
        <div class="container">
            <div class="auth-card">
                <h2>{ "Authentication" }</h2>
                {
                    match &*status {
                        CallbackStatus::Processing => html! {
                            <>
                                <div class="spinner"></div>
                                <p>{ "Please wait while we complete your sign in..." }</p>
                            </>
                        },
                        CallbackStatus::Success => html! {
                            <>
                                <p class="status-success">{ "Sign in successful!" }</p>
                                <p>{ "Redirecting you to your profile..." }</p>
                            </>
                        },
                        CallbackStatus::Failed(message) => html! {
                            <>
                                <p class="status-error">{ message.clone() }</p>
                                <p>{ "Redirecting you back to login..." }</p>
                            </>
                        },
                    }
                }
            </div>
        </div>
    }
}
