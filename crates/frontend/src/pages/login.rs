use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::services::api::ApiService;
use crate::session::SessionHandle;

#[function_component(Login)]
pub fn login() -> Html {
    let session = use_context::<SessionHandle>().expect("session context is set at the app root");
    let navigator = use_navigator().expect("login page is rendered inside a router");

    // Already signed in? Straight back to the profile.
    {
        let navigator = navigator.clone();
        use_effect_with(session.is_authenticated(), move |authenticated| {
            if *authenticated {
                navigator.push(&Route::Home);
            }
            || ()
        });
    }

    let on_google_login = Callback::from(|_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(&ApiService::google_login_url()) {
            tracing::error!("Failed to start Google sign-in: {:?}", e);
        }
    });

    html! {
        <div class="container">
            <div class="auth-card">
                <h2>{ "Welcome to AI Playground" }</h2>
                <p>{ "Sign in with your Google account to get started" }</p>
                <button class="btn btn-primary" onclick={on_google_login}>
                    { "Continue with Google" }
                </button>
                <p class="fine-print">
                    { "By signing in, you agree to our Terms of Service and Privacy Policy" }
                </p>
            </div>
        </div>
    }
}
