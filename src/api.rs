//! Requests against the Ergast-compatible statistics API.
//!
//! All endpoints are plain GETs returning an `MRData` envelope. Successful
//! bodies are kept in [`crate::cache`] so revisiting a page is free.

use crate::cache;
use crate::config::{API_BASE_URL, RACE_RESULTS_LIMIT, RETRY_DELAY_MS, RETRY_MAX_DELAY_MS};
use log::debug;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS), even after retries.
    Request(reqwest_middleware::Error),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not the JSON shape we expected.
    Decode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(e) => write!(f, "Request failed: {}", e),
            ApiError::Status(code) => write!(f, "Server responded with status {}", code),
            ApiError::Decode(e) => write!(f, "Unexpected response body: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Request(e) => Some(e),
            ApiError::Status(_) => None,
            ApiError::Decode(e) => Some(e),
        }
    }
}

impl From<reqwest_middleware::Error> for ApiError {
    fn from(e: reqwest_middleware::Error) -> Self {
        ApiError::Request(e)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request(reqwest_middleware::Error::Reqwest(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e)
    }
}

fn base_url() -> &'static str {
    API_BASE_URL.trim_end_matches('/')
}

pub fn seasons_url(limit: u32, offset: u32) -> String {
    format!("{}/f1/seasons.json?limit={}&offset={}", base_url(), limit, offset)
}

pub fn season_races_url(year: &str, limit: u32, offset: u32) -> String {
    format!(
        "{}/f1/{}/races.json?limit={}&offset={}",
        base_url(),
        year,
        limit,
        offset
    )
}

pub fn race_results_url(year: &str, round: &str) -> String {
    format!(
        "{}/f1/{}/{}/results.json?limit={}",
        base_url(),
        year,
        round,
        RACE_RESULTS_LIMIT
    )
}

/// Client that retries transient failures (connection errors, 408, 429, 5xx)
/// up to `retries` more times with exponential backoff.
pub fn client(retries: u32) -> ClientWithMiddleware {
    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(
            Duration::from_millis(RETRY_DELAY_MS),
            Duration::from_millis(RETRY_MAX_DELAY_MS),
        )
        .build_with_max_retries(retries);

    ClientBuilder::new(reqwest::Client::new())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}

fn check_status(status: reqwest::StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

/// Decode a fetched body and cache it under `url` if it decodes.
fn decode_and_cache<T: DeserializeOwned>(url: &str, body: String) -> Result<T, ApiError> {
    let value = serde_json::from_str(&body)?;
    cache::insert(url, body);
    Ok(value)
}

/// GET `url` and decode it, retrying transient failures `retries` more times.
///
/// A cached body short-circuits the request. Only bodies that decode are cached.
/// Decode errors and non-transient statuses fail on the first attempt.
pub async fn fetch_json<T: DeserializeOwned>(url: &str, retries: u32) -> Result<T, ApiError> {
    if let Some(body) = cache::get(url) {
        match serde_json::from_str(&body) {
            Ok(value) => {
                debug!("Cache hit for {}", url);
                return Ok(value);
            }
            Err(_) => cache::remove(url),
        }
    }

    let response = client(retries).get(url).send().await?;
    check_status(response.status())?;
    let body = response.text().await?;
    decode_and_cache(url, body)
}

/// Lifecycle of a single API request.
pub enum QueryState<T> {
    Loading,
    Failed(String),
    Ready(Rc<T>),
}

/// The latest request outcome, tagged with the URL it belongs to.
pub struct Fetched<T> {
    url: String,
    state: Rc<QueryState<T>>,
}

impl<T> Fetched<T> {
    pub fn new(url: impl Into<String>, state: QueryState<T>) -> Self {
        Self {
            url: url.into(),
            state: Rc::new(state),
        }
    }

    pub fn loading(url: impl Into<String>) -> Self {
        Self::new(url, QueryState::Loading)
    }

    /// The state to render for `url`. An outcome recorded for any other URL
    /// reads as `Loading`.
    pub fn state_for(&self, url: &str) -> Rc<QueryState<T>> {
        if self.url == url {
            self.state.clone()
        } else {
            Rc::new(QueryState::Loading)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeasonsResponse;

    #[test]
    fn urls_carry_paging() {
        let base = base_url();
        assert_eq!(
            seasons_url(10, 20),
            format!("{}/f1/seasons.json?limit=10&offset=20", base)
        );
        assert_eq!(
            season_races_url("2023", 5, 0),
            format!("{}/f1/2023/races.json?limit=5&offset=0", base)
        );
        assert_eq!(
            race_results_url("2023", "7"),
            format!("{}/f1/2023/7/results.json?limit=100", base)
        );
        assert!(!base.ends_with('/'));
    }

    #[test]
    fn only_success_statuses_pass() {
        assert!(check_status(reqwest::StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(reqwest::StatusCode::NOT_FOUND),
            Err(ApiError::Status(404))
        ));
        assert!(matches!(
            check_status(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            Err(ApiError::Status(503))
        ));
    }

    #[test]
    fn undecodable_body_fails_without_caching() {
        let url = "https://example.test/f1/garbage.json";
        cache::remove(url);

        let result: Result<SeasonsResponse, _> = decode_and_cache(url, "<html>".to_string());
        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert_eq!(cache::get(url), None);
    }

    #[test]
    fn decoded_body_is_cached() {
        let url = "https://example.test/f1/numbers.json";
        cache::remove(url);

        let value: Vec<u32> = decode_and_cache(url, "[1,2]".to_string()).unwrap();
        assert_eq!(value, vec![1, 2]);
        assert_eq!(cache::get(url).as_deref(), Some("[1,2]"));
        cache::remove(url);
    }

    #[test]
    fn result_for_previous_url_reads_as_loading() {
        let old = season_races_url("2022", 10, 0);
        let new = season_races_url("2023", 10, 0);
        let fetched = Fetched::new(old.as_str(), QueryState::Ready(Rc::new(vec![1u32, 2])));

        assert!(matches!(*fetched.state_for(&old), QueryState::Ready(ref v) if **v == [1, 2]));
        assert!(matches!(*fetched.state_for(&new), QueryState::Loading));

        let failed = Fetched::<u32>::new(old.as_str(), QueryState::Failed("503".into()));
        assert!(matches!(*failed.state_for(&new), QueryState::Loading));
    }

    #[test]
    fn status_error_message() {
        assert_eq!(
            ApiError::Status(503).to_string(),
            "Server responded with status 503"
        );
    }
}
