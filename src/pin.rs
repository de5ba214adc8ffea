//! Pinned-item ordering.
//!
//! A list of items is shown as `pinned ++ sorted(rest)`: the pinned block keeps
//! the order in which items were pinned, and everything else is stably sorted
//! by a caller-supplied comparator. The pinned block is persisted through a
//! [`PinStore`] under a storage key, as full item snapshots, so a pinned item
//! stays visible even when it is missing from the latest fetched page.
//!
//! # Example
//! ```
//! use f1_seasons::pin::PinEngine;
//! use f1_seasons::storage::MemoryStore;
//! use serde::{Deserialize, Serialize};
//! use std::rc::Rc;
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Lap {
//!     n: u32,
//! }
//!
//! let laps: Vec<Lap> = (1..=3).map(|n| Lap { n }).collect();
//! let mut engine = PinEngine::new(
//!     MemoryStore::new(),
//!     "laps",
//!     Rc::new(|lap: &Lap| lap.n),
//!     Rc::new(|a: &Lap, b: &Lap| b.n.cmp(&a.n)),
//! );
//! engine.set_items(Some(laps.as_slice()));
//! engine.toggle(2);
//!
//! let order: Vec<u32> = engine.display_order().iter().map(|p| p.item.n).collect();
//! assert_eq!(order, vec![1, 3, 2]);
//! ```

use crate::storage::PinStore;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

/// Extracts the identity of an item. Two items are the same iff their keys are equal.
pub type KeyFn<T, K> = Rc<dyn Fn(&T) -> K>;

/// Orders the unpinned items. `Less` puts the first argument earlier.
pub type CompareFn<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// An item together with its pinned flag.
///
/// Serialized flattened, i.e. as the item's own fields plus an optional
/// `isPinned` boolean. Freshly fetched items carry no flag at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pinnable<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(rename = "isPinned", default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl<T> Pinnable<T> {
    pub fn new(item: T) -> Self {
        Self {
            item,
            is_pinned: None,
        }
    }

    pub fn pinned(item: T) -> Self {
        Self {
            item,
            is_pinned: Some(true),
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned.unwrap_or(false)
    }
}

/// Compute the display order: `pinned` as given, then every item whose key is
/// not pinned, stably sorted by `compare`.
///
/// Items are not deduplicated among themselves; only keys already present in
/// `pinned` are filtered out.
pub fn order_items<T, K>(
    items: Option<&[T]>,
    pinned: &[Pinnable<T>],
    key: &dyn Fn(&T) -> K,
    compare: &dyn Fn(&T, &T) -> Ordering,
) -> Vec<Pinnable<T>>
where
    T: Clone,
    K: Eq + Hash,
{
    let pinned_keys: HashSet<K> = pinned.iter().map(|p| key(&p.item)).collect();

    let mut unpinned: Vec<&T> = items
        .unwrap_or_default()
        .iter()
        .filter(|item| !pinned_keys.contains(&key(item)))
        .collect();
    // `sort_by` is stable: ties keep their fetched order
    unpinned.sort_by(|a, b| compare(a, b));

    let mut out = Vec::with_capacity(pinned.len() + unpinned.len());
    out.extend(pinned.iter().cloned());
    out.extend(unpinned.into_iter().map(|item| Pinnable::new(item.clone())));
    out
}

/// Flip the pinned state of `display[index]` and return the new pinned set.
///
/// Pinning removes any entry with the same key and appends the displayed
/// snapshot at the end of the pinned block. Unpinning only removes it.
/// Returns `None` when `index` is out of bounds.
pub fn toggle_pinned<T, K>(
    display: &[Pinnable<T>],
    pinned: &[Pinnable<T>],
    index: usize,
    key: &dyn Fn(&T) -> K,
) -> Option<Vec<Pinnable<T>>>
where
    T: Clone,
    K: Eq,
{
    let target = display.get(index)?;
    let target_key = key(&target.item);

    let mut next: Vec<Pinnable<T>> = pinned
        .iter()
        .filter(|p| key(&p.item) != target_key)
        .cloned()
        .collect();

    if !target.is_pinned() {
        next.push(Pinnable::pinned(target.item.clone()));
    }
    Some(next)
}

/// Read the pinned set stored under `storage_key`.
///
/// Missing or malformed data yields an empty set. Loaded entries are
/// normalized: every flag is set, and later duplicates of a key are dropped.
pub fn load_pinned<T, K, S>(store: &S, storage_key: &str, key: &dyn Fn(&T) -> K) -> Vec<Pinnable<T>>
where
    T: DeserializeOwned,
    K: Eq + Hash,
    S: PinStore + ?Sized,
{
    let Some(raw) = store.get(storage_key) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Pinnable<T>>>(&raw) {
        Ok(entries) => {
            let mut seen = HashSet::new();
            entries
                .into_iter()
                .filter(|p| seen.insert(key(&p.item)))
                .map(|p| Pinnable::pinned(p.item))
                .collect()
        }
        Err(e) => {
            warn!("Ignoring malformed pinned set under '{}': {}", storage_key, e);
            Vec::new()
        }
    }
}

/// Holds the pinned set for one storage key and the last computed display order.
///
/// Callers feed the latest items with [`PinEngine::set_items`] and flip pins
/// with [`PinEngine::toggle`]; every toggle is written through to the store
/// before it returns.
pub struct PinEngine<T, K, S> {
    store: S,
    storage_key: String,
    key: KeyFn<T, K>,
    compare: CompareFn<T>,
    items: Vec<T>,
    pinned: Vec<Pinnable<T>>,
    display: Vec<Pinnable<T>>,
}

impl<T, K, S> PinEngine<T, K, S>
where
    T: Clone + Serialize + DeserializeOwned,
    K: Eq + Hash,
    S: PinStore,
{
    pub fn new(
        store: S,
        storage_key: impl Into<String>,
        key: KeyFn<T, K>,
        compare: CompareFn<T>,
    ) -> Self {
        let storage_key = storage_key.into();
        let pinned = load_pinned(&store, &storage_key, key.as_ref());
        debug!("Loaded {} pinned items for '{}'", pinned.len(), storage_key);

        let display = pinned.clone();
        Self {
            store,
            storage_key,
            key,
            compare,
            items: Vec::new(),
            pinned,
            display,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn pinned(&self) -> &[Pinnable<T>] {
        &self.pinned
    }

    pub fn display_order(&self) -> &[Pinnable<T>] {
        &self.display
    }

    /// Point the engine at another storage key, loading its pinned set.
    pub fn switch_storage_key(&mut self, storage_key: impl Into<String>) {
        self.storage_key = storage_key.into();
        self.reload();
    }

    /// Re-read the pinned set from the store and recompute the display order.
    pub fn reload(&mut self) {
        self.pinned = load_pinned(&self.store, &self.storage_key, self.key.as_ref());
        self.recompute();
    }

    /// Replace the current items (`None` means "not fetched yet") and return
    /// the new display order.
    pub fn set_items(&mut self, items: Option<&[T]>) -> &[Pinnable<T>] {
        self.items = items.map(<[T]>::to_vec).unwrap_or_default();
        self.recompute();
        &self.display
    }

    /// Flip the pinned state of the item at `index` in the current display
    /// order. Out-of-range indices are ignored. Returns whether anything changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(next) = toggle_pinned(&self.display, &self.pinned, index, self.key.as_ref()) else {
            debug!(
                "Ignoring toggle at {} for '{}' ({} items shown)",
                index,
                self.storage_key,
                self.display.len()
            );
            return false;
        };

        self.pinned = next;
        self.persist();
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.display = order_items(
            Some(self.items.as_slice()),
            &self.pinned,
            self.key.as_ref(),
            self.compare.as_ref(),
        );
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.pinned) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not serialize pinned set '{}': {}", self.storage_key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.storage_key, &raw) {
            warn!("Could not persist pinned set '{}': {}", self.storage_key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Dated {
        id: String,
        d: i64,
    }

    fn dated(id: &str, d: i64) -> Dated {
        Dated { id: id.to_string(), d }
    }

    fn by_id(item: &Dated) -> String {
        item.id.clone()
    }

    fn newest_first(a: &Dated, b: &Dated) -> Ordering {
        b.d.cmp(&a.d)
    }

    fn ids(list: &[Pinnable<Dated>]) -> Vec<&str> {
        list.iter().map(|p| p.item.id.as_str()).collect()
    }

    #[test]
    fn pinned_items_lead_and_rest_is_sorted() {
        let items = vec![dated("1", 1), dated("2", 2), dated("3", 3)];
        let pinned = vec![Pinnable::pinned(dated("2", 2))];

        let out = order_items(Some(items.as_slice()), &pinned, &by_id, &newest_first);
        assert_eq!(ids(&out), vec!["2", "3", "1"]);
        assert_eq!(out[0].is_pinned, Some(true));
        assert_eq!(out[1].is_pinned, None);
        assert_eq!(out[2].is_pinned, None);
    }

    #[test]
    fn absent_items_yield_only_pinned() {
        let pinned = vec![Pinnable::pinned(dated("a", 1)), Pinnable::pinned(dated("b", 2))];
        let out = order_items(None, &pinned, &by_id, &newest_first);
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn ties_keep_fetched_order() {
        let items = vec![dated("x", 5), dated("y", 7), dated("z", 5), dated("w", 7)];
        let out = order_items(Some(items.as_slice()), &[], &by_id, &newest_first);
        assert_eq!(ids(&out), vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn duplicate_input_keys_are_both_kept() {
        let items = vec![dated("a", 1), dated("a", 1)];
        let out = order_items(Some(items.as_slice()), &[], &by_id, &newest_first);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn toggle_appends_newly_pinned_item_last() {
        let items = vec![dated("1", 1), dated("2", 2), dated("3", 3)];
        let pinned = vec![Pinnable::pinned(dated("1", 1))];
        let display = order_items(Some(items.as_slice()), &pinned, &by_id, &newest_first);
        assert_eq!(ids(&display), vec!["1", "3", "2"]);

        let next = toggle_pinned(&display, &pinned, 2, &by_id).unwrap();
        assert_eq!(ids(&next), vec!["1", "2"]);
        assert!(next.iter().all(Pinnable::is_pinned));
    }

    #[test]
    fn toggle_on_pinned_item_removes_it() {
        let pinned = vec![Pinnable::pinned(dated("1", 1)), Pinnable::pinned(dated("3", 3))];
        let fetched = vec![dated("2", 2)];
        let display = order_items(Some(fetched.as_slice()), &pinned, &by_id, &newest_first);

        let next = toggle_pinned(&display, &pinned, 1, &by_id).unwrap();
        assert_eq!(ids(&next), vec!["1"]);
    }

    #[test]
    fn toggle_out_of_range_is_none() {
        let display = vec![Pinnable::new(dated("1", 1))];
        assert!(toggle_pinned(&display, &[], 1, &by_id).is_none());
    }

    #[test]
    fn load_normalizes_flags_and_duplicates() {
        let store = MemoryStore::new();
        store
            .set(
                "k",
                r#"[{"id":"a","d":1},{"id":"b","d":2,"isPinned":false},{"id":"a","d":9,"isPinned":true}]"#,
            )
            .unwrap();

        let pinned: Vec<Pinnable<Dated>> = load_pinned(&store, "k", &by_id);
        assert_eq!(ids(&pinned), vec!["a", "b"]);
        assert_eq!(pinned[0].item.d, 1);
        assert!(pinned.iter().all(Pinnable::is_pinned));
    }

    #[test]
    fn load_treats_malformed_data_as_empty() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let pinned: Vec<Pinnable<Dated>> = load_pinned(&store, "k", &by_id);
        assert!(pinned.is_empty());

        store.set("k", r#"{"id":"a"}"#).unwrap();
        let pinned: Vec<Pinnable<Dated>> = load_pinned(&store, "k", &by_id);
        assert!(pinned.is_empty());
    }

    #[test]
    fn pinnable_serializes_flat() {
        let json = serde_json::to_value(Pinnable::pinned(dated("7", 3))).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "7", "d": 3, "isPinned": true }));

        let json = serde_json::to_value(Pinnable::new(dated("7", 3))).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "7", "d": 3 }));
    }

    #[test]
    fn switching_storage_key_loads_independent_set() {
        let store = MemoryStore::new();
        let mut engine = PinEngine::new(
            store.clone(),
            "pinned-races-2023",
            Rc::new(by_id),
            Rc::new(newest_first),
        );
        engine.set_items(Some(vec![dated("1", 1), dated("2", 2)].as_slice()));
        assert!(engine.toggle(0));
        assert_eq!(ids(engine.pinned()), vec!["2"]);

        engine.switch_storage_key("pinned-races-2022");
        assert!(engine.pinned().is_empty());
        assert_eq!(ids(engine.display_order()), vec!["2", "1"]);

        engine.switch_storage_key("pinned-races-2023");
        assert_eq!(ids(engine.pinned()), vec!["2"]);
    }
}
