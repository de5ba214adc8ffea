use crate::config::{PINNED_RACES_STORAGE_PREFIX, RACE_RESULTS_LIMIT};
use crate::models::{Race, RaceResult, Season};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

// Compiled regex for API dates
static ISO_DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of pages needed to show `total` items, `limit` per page.
pub fn page_count(total: u32, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// 1-based page that starts at `offset`.
pub fn current_page(offset: u32, limit: u32) -> u32 {
    offset / limit.max(1) + 1
}

/// Offset of the first item on the 1-based `page`.
pub fn offset_for_page(page: u32, limit: u32) -> u32 {
    page.saturating_sub(1) * limit
}

/// One entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

/// Pages to show for `total` pages around the 1-based `current` page: always
/// the first and last page, one sibling on each side of the current page, and
/// gaps for the rest. The control keeps a constant width of 7 entries.
pub fn pagination_items(current: u32, total: u32) -> Vec<PageItem> {
    if total <= 7 {
        return (1..=total).map(PageItem::Page).collect();
    }
    let current = current.clamp(1, total);

    let mut items = Vec::with_capacity(7);
    if current <= 4 {
        items.extend((1..=5).map(PageItem::Page));
        items.push(PageItem::Gap);
        items.push(PageItem::Page(total));
    } else if current >= total - 3 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Gap);
        items.extend((total - 4..=total).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Gap);
        items.extend((current - 1..=current + 1).map(PageItem::Page));
        items.push(PageItem::Gap);
        items.push(PageItem::Page(total));
    }
    items
}

/// Format an API date ("2023-03-05") as "March 5, 2023".
/// Anything that is not a valid `YYYY-MM-DD` date is returned unchanged.
pub fn format_long_date(date: &str) -> String {
    let Some(captures) = ISO_DATE_REGEX.captures(date.trim()) else {
        return date.to_string();
    };
    let (Ok(year), Ok(month), Ok(day)) = (
        captures[1].parse::<u32>(),
        captures[2].parse::<usize>(),
        captures[3].parse::<u32>(),
    ) else {
        return date.to_string();
    };

    match MONTHS.get(month.wrapping_sub(1)) {
        Some(name) if (1..=31).contains(&day) => format!("{} {}, {}", name, day, year),
        _ => date.to_string(),
    }
}

/// Races are pinned by name; a name is unique within a season.
pub fn race_key(race: &Race) -> String {
    race.race_name.clone()
}

/// Earliest race first; same-day entries fall back to the round number.
pub fn compare_races(a: &Race, b: &Race) -> Ordering {
    a.date.cmp(&b.date).then_with(|| {
        let round_a = a.round.parse::<u32>().unwrap_or(u32::MAX);
        let round_b = b.round.parse::<u32>().unwrap_or(u32::MAX);
        round_a.cmp(&round_b)
    })
}

pub fn season_key(season: &Season) -> String {
    season.season.clone()
}

pub fn compare_seasons(a: &Season, b: &Season) -> Ordering {
    a.season.cmp(&b.season)
}

/// Pins are scoped per season.
pub fn pinned_races_storage_key(year: &str) -> String {
    format!("{}-{}", PINNED_RACES_STORAGE_PREFIX, year)
}

/// Build a case-insensitive matcher for the search box. The term is tried as a
/// regular expression first and matched literally if it does not compile.
pub fn driver_matcher(term: &str) -> Option<Regex> {
    if term.is_empty() {
        return None;
    }
    RegexBuilder::new(term)
        .case_insensitive(true)
        .size_limit(1 << 20)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

/// Entry keys (`number-driverId`) of every result whose driver's full name
/// matches the search term.
pub fn highlighted_drivers(results: &[RaceResult], term: &str) -> HashSet<String> {
    let Some(matcher) = driver_matcher(term) else {
        return HashSet::new();
    };
    results
        .iter()
        .filter(|r| matcher.is_match(&r.driver_name()))
        .map(RaceResult::entry_key)
        .collect()
}

/// One bar of the drivers performance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceBar {
    pub driver_id: String,
    /// Race time in minutes; `None` for drivers without a classified time.
    pub time: Option<f64>,
    pub laps: u32,
    pub status: String,
}

pub fn performance_series(results: &[RaceResult]) -> Vec<PerformanceBar> {
    results
        .iter()
        .take(RACE_RESULTS_LIMIT as usize)
        .map(|r| PerformanceBar {
            driver_id: format!("#{} {}", r.number, r.driver.driver_id),
            time: r
                .time
                .as_ref()
                .and_then(|t| t.millis.parse::<f64>().ok())
                .map(|ms| ms / 60_000.0),
            laps: r.laps.parse().unwrap_or(0),
            status: r.status.clone(),
        })
        .collect()
}
