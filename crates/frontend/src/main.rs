mod components;
mod pages;
mod router;
mod services;
mod session;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::router::{switch, Route};
use crate::session::{Session, SessionHandle};

#[function_component(App)]
fn app() -> Html {
    // Session state lives here and reaches every page through context,
    // seeded from LocalStorage so a reload keeps the user signed in.
    let session = use_reducer(Session::restore);

    html! {
        <ContextProvider<SessionHandle> context={session}>
            <BrowserRouter>
                <div id="app">
                    <components::header::Header />
                    <yew_router::Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<SessionHandle>>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
