use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::session::SessionHandle;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    let session = use_context::<SessionHandle>().expect("session context is set at the app root");

    // Signed-out visitors have nothing at Home but another redirect.
    let destination = if session.is_authenticated() {
        Route::Home
    } else {
        Route::Login
    };

    html! {
        <div class="container">
            <div class="empty-state">
                <h2>{ "404 - Page Not Found" }</h2>
                <p>{ "There's nothing at this address." }</p>
                <Link<Route> to={destination}>
                    <button class="btn btn-primary">{ "Take me back" }</button>
                </Link<Route>>
            </div>
        </div>
    }
}
