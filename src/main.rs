//! Main module for the F1 seasons application using Yew.
//! Wires routing, navigation and the page components.

use f1_seasons::config::LOG_LEVEL;
use f1_seasons::logger;
use f1_seasons::route::Route;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

mod chart;
mod components;
mod hooks;
mod pages;

use components::{AppShell, Navigator};
use pages::{NotFoundPage, RaceDetailsPage, SeasonRacesPage, SeasonsPage};

/// Resolve the route from the browser's current location.
fn current_route() -> Route {
    let location = gloo_utils::window().location();
    Route::parse(
        &location.pathname().unwrap_or_default(),
        &location.search().unwrap_or_default(),
    )
}

/// Push `route` onto the history stack so back/forward keep working.
fn push_history(route: &Route) {
    let href = route.href();
    match gloo_utils::window().history() {
        Ok(history) => {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&href)) {
                warn!("pushState to {} failed: {:?}", href, e);
            }
        }
        Err(e) => warn!("History API unavailable: {:?}", e),
    }
}

/// Application root: owns the current route and provides the navigator.
#[function_component]
pub fn App() -> Html {
    let route = use_state(current_route);

    // Follow back/forward navigation
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn Fn()>::new(move || route.set(current_route()));
            let callback = listener.as_ref().unchecked_ref();
            let window = gloo_utils::window();
            if let Err(e) = window.add_event_listener_with_callback("popstate", callback) {
                warn!("Could not listen for popstate: {:?}", e);
            }

            move || {
                let callback = listener.as_ref().unchecked_ref();
                if let Err(e) = window.remove_event_listener_with_callback("popstate", callback) {
                    warn!("Could not remove popstate listener: {:?}", e);
                }
            }
        });
    }

    let navigator = {
        let route = route.clone();
        Navigator::new(Callback::from(move |next: Route| {
            info!("Navigating to {}", next.href());
            push_history(&next);
            route.set(next);
        }))
    };

    let page = match (*route).clone() {
        Route::Seasons(query) => html! { <SeasonsPage {query} /> },
        Route::SeasonRaces { year, query } => html! { <SeasonRacesPage {year} {query} /> },
        Route::RaceDetails { year, round } => html! { <RaceDetailsPage {year} {round} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <ContextProvider<Navigator> context={navigator}>
            <AppShell>{ page }</AppShell>
        </ContextProvider<Navigator>>
    }
}

/// Entry point: installs panic/log hooks and renders the App component.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    if let Err(e) = logger::init(LOG_LEVEL) {
        web_sys::console::warn_1(&format!("Logger already installed: {}", e).into());
    }
    yew::Renderer::<App>::new().render();
}
