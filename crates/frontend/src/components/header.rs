use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::session::{SessionAction, SessionHandle};

#[function_component(Header)]
pub fn header() -> Html {
    let session = use_context::<SessionHandle>().expect("session context is set at the app root");
    let navigator = use_navigator().expect("header is rendered inside a router");

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            session.dispatch(SessionAction::Clear);
            navigator.push(&Route::Login);
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{ "AI Playground" }</h1>
                <nav>
                    {
                        if let Some(user) = &session.user {
                            html! {
                                <>
                                    <span class="user-name">{ user.name.clone() }</span>
                                    <button class="btn btn-secondary" onclick={on_logout}>
                                        { "Logout" }
                                    </button>
                                </>
                            }
                        } else {
                            html! {
                                <Link<Route> to={Route::Login}>{ "Sign In" }</Link<Route>>
                            }
                        }
                    }
                </nav>
            </div>
        </header>
    }
}
