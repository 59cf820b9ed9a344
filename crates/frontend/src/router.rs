use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{auth_callback::AuthCallback, home::Home, login::Login, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/auth/callback")]
    AuthCallback,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Login => html! { <Login /> },
        Route::AuthCallback => html! { <AuthCallback /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
