//! Custom hooks: pinned ordering, API queries and debounced state.

use f1_seasons::api::{self, Fetched, QueryState};
use f1_seasons::pin::{CompareFn, KeyFn, PinEngine, Pinnable};
use f1_seasons::storage::BrowserStore;
use gloo_timers::callback::Timeout;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;
use yew::prelude::*;

/// Display order plus the toggle callback returned by [`use_pin_item`].
pub struct PinnedItems<T> {
    pub items: Rc<Vec<Pinnable<T>>>,
    pub on_toggle: Callback<usize>,
}

/// Order `items` with the pinned set stored under `storage_key` in local storage.
///
/// The display order is recomputed on every render. `key` and `compare` are
/// captured on first use; a new `storage_key` loads that key's pinned set.
#[hook]
pub fn use_pin_item<T>(
    items: Option<Rc<Vec<T>>>,
    storage_key: String,
    key: KeyFn<T, String>,
    compare: CompareFn<T>,
) -> PinnedItems<T>
where
    T: Clone + Serialize + DeserializeOwned + 'static,
{
    let engine = {
        let storage_key = storage_key.clone();
        use_mut_ref(move || PinEngine::new(BrowserStore, storage_key, key, compare))
    };
    // Bumped on every toggle to trigger a re-render
    let version = use_state(|| 0usize);

    if engine.borrow().storage_key() != storage_key {
        debug!("Switching pinned set to '{}'", storage_key);
        engine.borrow_mut().switch_storage_key(storage_key);
    }

    let ordered = Rc::new(
        engine
            .borrow_mut()
            .set_items(items.as_deref().map(Vec::as_slice))
            .to_vec(),
    );

    let on_toggle = {
        // Clone handles for the closure.
        let engine = engine.clone();
        let version = version.clone();
        Callback::from(move |index: usize| {
            if engine.borrow_mut().toggle(index) {
                version.set(version.wrapping_add(1));
            }
        })
    };

    PinnedItems {
        items: ordered,
        on_toggle,
    }
}

pub struct Query<T> {
    pub state: Rc<QueryState<T>>,
    /// Re-issue the request, e.g. from a "Retry" button.
    pub refetch: Callback<()>,
}

/// Fetch and decode `url`, re-running whenever it changes.
///
/// Responses that arrive after the URL has changed (or the component has
/// unmounted) are dropped.
#[hook]
pub fn use_query<T>(url: String, retries: u32) -> Query<T>
where
    T: DeserializeOwned + 'static,
{
    let fetched = use_state({
        let url = url.clone();
        move || Fetched::<T>::loading(url)
    });
    // A result for the previous URL must not leak into this render
    let state = fetched.state_for(&url);
    // Incremented to force a refetch of the same URL
    let trigger = use_state(|| 0usize);
    let request_token = use_mut_ref(|| 0u32);

    {
        let fetched = fetched.clone();
        let request_token = request_token.clone();
        use_effect_with((url, *trigger), move |(url, _)| {
            *request_token.borrow_mut() += 1;
            let token = *request_token.borrow();
            let url = url.clone();

            fetched.set(Fetched::loading(url.clone()));
            {
                let request_token = request_token.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = api::fetch_json::<T>(&url, retries).await;
                    if *request_token.borrow() != token {
                        debug!("Dropping superseded response for {}", url);
                        return;
                    }
                    let state = match result {
                        Ok(value) => QueryState::Ready(Rc::new(value)),
                        Err(e) => {
                            warn!("Request to {} failed: {}", url, e);
                            QueryState::Failed(e.to_string())
                        }
                    };
                    fetched.set(Fetched::new(url, state));
                });
            }

            move || {
                *request_token.borrow_mut() += 1;
            }
        });
    }

    let refetch = {
        let trigger = trigger.clone();
        Callback::from(move |_| trigger.set(trigger.wrapping_add(1)))
    };

    Query { state, refetch }
}

/// State whose setter only applies after `delay_ms` without further calls.
#[hook]
pub fn use_debounced_state<T>(initial: T, delay_ms: u32) -> (T, Callback<T>)
where
    T: Clone + 'static,
{
    let value = use_state(move || initial);
    let timer = use_mut_ref(|| None::<Timeout>);

    let set_debounced = {
        let value = value.clone();
        Callback::from(move |next: T| {
            let value = value.clone();
            // Replacing the handle drops, and so cancels, any pending timeout
            *timer.borrow_mut() = Some(Timeout::new(delay_ms, move || value.set(next)));
        })
    };

    ((*value).clone(), set_debounced)
}
