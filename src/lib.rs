//! Core of the F1 seasons browser.
//!
//! Everything here is plain Rust that runs (and is tested) natively: the
//! pinned-item ordering engine, its storage backends, the API models and
//! client, routing and the formatting helpers. The Yew front-end in `main.rs`
//! only wires these into components.

pub mod api;
pub mod cache;
pub mod config;
pub mod logger;
pub mod models;
pub mod pin;
pub mod route;
pub mod storage;
pub mod utils;

pub use models::{Race, RaceResult, Season};
pub use pin::{PinEngine, Pinnable};
pub use route::{ListQuery, Route, ViewType};
pub use storage::{BrowserStore, MemoryStore, PinStore};
