//! Application-level configuration constants.

// Remote API
pub const API_BASE_URL: &str = match option_env!("F1_API_BASE_URL") {
    Some(url) => url,
    None => "https://api.jolpi.ca/ergast",
};
pub const RACE_RESULTS_LIMIT: u32 = 100;
pub const SEASONS_RETRIES: u32 = 5;
pub const DEFAULT_RETRIES: u32 = 3;
// Backoff bounds between retries of a transient failure
pub const RETRY_DELAY_MS: u64 = 1_000;
pub const RETRY_MAX_DELAY_MS: u64 = 8_000;

// Default values for list query parameters
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_OFFSET: u32 = 0;

// UI behavior
pub const SEARCH_DEBOUNCE_MS: u32 = 500;
pub const CHART_CANVAS_ID: &str = "performanceChart";

// Local storage keys
pub const PINNED_RACES_STORAGE_PREFIX: &str = "pinned-races";
pub const PINNED_SEASONS_STORAGE_KEY: &str = "pinned-seasons";

pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;
