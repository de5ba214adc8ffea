//! Client-side routes and their query parameters.
//!
//! The URL is the only navigation state: page, page size and view type are all
//! read from `path?query` and written back when the user navigates.

use crate::config::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SEASON_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/seasons/(\d{4})/?$").expect("valid season path regex"));
static RACE_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/seasons/(\d{4})/races/(\d+)/?$").expect("valid race path regex")
});

/// Parse a query parameter as an integer, falling back to `default` when it is
/// missing or not a number.
///
/// ```
/// use f1_seasons::route::parse_integer_or_default;
/// assert_eq!(parse_integer_or_default(Some("20"), 10), 20);
/// assert_eq!(parse_integer_or_default(Some("abc"), 10), 10);
/// assert_eq!(parse_integer_or_default(None, 10), 10);
/// ```
pub fn parse_integer_or_default(param: Option<&str>, default: u32) -> u32 {
    param
        .and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewType {
    #[default]
    List,
    Grid,
}

impl ViewType {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewType::List => "list",
            ViewType::Grid => "grid",
        }
    }

    /// Unknown values fall back to the list view.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("grid") => ViewType::Grid,
            _ => ViewType::List,
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `limit`, `offset` and `view` of a paginated list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub offset: u32,
    pub view: ViewType,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            view: ViewType::List,
        }
    }
}

impl ListQuery {
    /// Parse a raw query string (with or without the leading `?`).
    /// A zero `limit` would make paging meaningless and is raised to 1.
    pub fn from_query_string(query: &str) -> Self {
        let mut limit = None;
        let mut offset = None;
        let mut view = None;

        for pair in query.trim_start_matches('?').split('&') {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            match name {
                "limit" => limit = Some(value),
                "offset" => offset = Some(value),
                "view" => view = Some(value),
                _ => {}
            }
        }

        Self {
            limit: parse_integer_or_default(limit, DEFAULT_LIMIT).max(1),
            offset: parse_integer_or_default(offset, DEFAULT_OFFSET),
            view: ViewType::parse(view),
        }
    }

    pub fn to_query_string(&self) -> String {
        format!("limit={}&offset={}&view={}", self.limit, self.offset, self.view)
    }

    pub fn with_offset(self, offset: u32) -> Self {
        Self { offset, ..self }
    }

    pub fn with_view(self, view: ViewType) -> Self {
        Self { view, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Seasons(ListQuery),
    SeasonRaces { year: String, query: ListQuery },
    RaceDetails { year: String, round: String },
    NotFound,
}

impl Route {
    /// Resolve a location's `pathname` and `search` into a route.
    pub fn parse(path: &str, query: &str) -> Self {
        let path = path.trim();
        if path.is_empty() || path == "/" || path.trim_end_matches('/') == "/seasons" {
            return Route::Seasons(ListQuery::from_query_string(query));
        }
        if let Some(captures) = SEASON_PATH_REGEX.captures(path) {
            return Route::SeasonRaces {
                year: captures[1].to_string(),
                query: ListQuery::from_query_string(query),
            };
        }
        if let Some(captures) = RACE_PATH_REGEX.captures(path) {
            return Route::RaceDetails {
                year: captures[1].to_string(),
                round: captures[2].to_string(),
            };
        }
        Route::NotFound
    }

    pub fn seasons() -> Self {
        Route::Seasons(ListQuery::default())
    }

    pub fn season_races(year: &str) -> Self {
        Route::SeasonRaces {
            year: year.to_string(),
            query: ListQuery::default(),
        }
    }

    pub fn race_details(year: &str, round: &str) -> Self {
        Route::RaceDetails {
            year: year.to_string(),
            round: round.to_string(),
        }
    }

    pub fn href(&self) -> String {
        match self {
            Route::Seasons(query) => format!("/seasons?{}", query.to_query_string()),
            Route::SeasonRaces { year, query } => {
                format!("/seasons/{}?{}", year, query.to_query_string())
            }
            Route::RaceDetails { year, round } => format!("/seasons/{}/races/{}", year, round),
            Route::NotFound => "/seasons".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_seasons_resolve_to_list() {
        assert_eq!(Route::parse("/", ""), Route::seasons());
        assert_eq!(Route::parse("/seasons/", ""), Route::seasons());
        assert_eq!(
            Route::parse("/seasons", "?limit=20&offset=40&view=grid"),
            Route::Seasons(ListQuery {
                limit: 20,
                offset: 40,
                view: ViewType::Grid
            })
        );
    }

    #[test]
    fn nested_paths_capture_year_and_round() {
        assert_eq!(
            Route::parse("/seasons/2023", "view=list&offset=10"),
            Route::SeasonRaces {
                year: "2023".into(),
                query: ListQuery {
                    limit: 10,
                    offset: 10,
                    view: ViewType::List
                }
            }
        );
        assert_eq!(
            Route::parse("/seasons/2023/races/7", "?view=grid"),
            Route::race_details("2023", "7")
        );
        assert_eq!(Route::parse("/seasons/abcd", ""), Route::NotFound);
        assert_eq!(Route::parse("/drivers", ""), Route::NotFound);
    }

    #[test]
    fn bad_query_values_use_defaults() {
        let query = ListQuery::from_query_string("limit=x&offset=-3&view=table&extra");
        assert_eq!(query, ListQuery::default());
        assert_eq!(ListQuery::from_query_string("limit=0").limit, 1);
    }

    #[test]
    fn href_round_trips_through_parse() {
        let route = Route::SeasonRaces {
            year: "1998".into(),
            query: ListQuery::default().with_offset(30).with_view(ViewType::Grid),
        };
        assert_eq!(route.href(), "/seasons/1998?limit=10&offset=30&view=grid");

        let href = route.href();
        let (path, query) = href.split_once('?').unwrap();
        assert_eq!(Route::parse(path, query), route);
    }
}
