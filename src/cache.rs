//! Thread-local cache of API response bodies.
//!
//! The cache survives page navigation, so going back to a page that was
//! already loaded renders immediately without another request. Entries are
//! keyed by the full request URL (query string included) and hold the raw
//! JSON body, which is decoded again on every hit.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    /// Thread-local to avoid synchronization overhead in WASM.
    static RESPONSE_CACHE: RefCell<HashMap<String, String>> =
        RefCell::new(HashMap::with_capacity(64));
}

pub fn get(url: &str) -> Option<String> {
    RESPONSE_CACHE.with(|c| c.borrow().get(url).cloned())
}

pub fn insert(url: &str, body: String) {
    RESPONSE_CACHE.with(|c| {
        c.borrow_mut().insert(url.to_string(), body);
    });
}

pub fn remove(url: &str) {
    RESPONSE_CACHE.with(|c| {
        c.borrow_mut().remove(url);
    });
}

pub fn clear() {
    RESPONSE_CACHE.with(|c| c.borrow_mut().clear());
}

pub fn len() -> usize {
    RESPONSE_CACHE.with(|c| c.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        clear();
        assert_eq!(get("https://x/f1/seasons.json"), None);

        insert("https://x/f1/seasons.json", "{}".to_string());
        assert_eq!(get("https://x/f1/seasons.json").as_deref(), Some("{}"));
        assert_eq!(len(), 1);

        remove("https://x/f1/seasons.json");
        assert_eq!(get("https://x/f1/seasons.json"), None);
    }

    #[test]
    fn clear_drops_everything() {
        clear();
        insert("a", "1".to_string());
        insert("b", "2".to_string());
        clear();
        assert_eq!(len(), 0);
    }
}
