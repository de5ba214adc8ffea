//! Route-level components: fetch data, apply pin ordering, pick a view.

use crate::chart::{destroy_performance_chart, render_performance_chart};
use crate::components::{
    use_navigator, Breadcrumbs, DriverCard, DriverSearch, ErrorView, Link, Loader, Navigator,
    Pagination, RacesCardView, RacesInfoView, SeasonsCardView, SeasonsInfoView, ViewToggle,
};
use crate::hooks::{use_debounced_state, use_pin_item, use_query};
use f1_seasons::api::{self, QueryState};
use f1_seasons::config::{
    CHART_CANVAS_ID, DEFAULT_RETRIES, PINNED_SEASONS_STORAGE_KEY, SEARCH_DEBOUNCE_MS,
    SEASONS_RETRIES,
};
use f1_seasons::models::{Race, RaceDetailsResponse, RacesResponse, Season, SeasonsResponse};
use f1_seasons::route::{ListQuery, Route, ViewType};
use f1_seasons::utils::{
    compare_races, compare_seasons, current_page, highlighted_drivers, offset_for_page,
    page_count, performance_series, pinned_races_storage_key, race_key, season_key,
};
use std::rc::Rc;
use yew::prelude::*;

/// Page-change and view-change callbacks for a paginated list. `to_route`
/// builds the route for an updated query.
fn list_callbacks(
    navigator: Option<Navigator>,
    query: ListQuery,
    to_route: impl Fn(ListQuery) -> Route + Clone + 'static,
) -> (Callback<u32>, Callback<ViewType>) {
    let on_page_change = {
        let navigator = navigator.clone();
        let to_route = to_route.clone();
        Callback::from(move |page: u32| {
            if let Some(navigator) = &navigator {
                navigator.push(to_route(query.with_offset(offset_for_page(page, query.limit))));
            }
        })
    };

    let on_view_change = Callback::from(move |view: ViewType| {
        // Snap to the start of the current page when switching views
        let page = current_page(query.offset, query.limit);
        if let Some(navigator) = &navigator {
            navigator.push(to_route(
                query
                    .with_offset(offset_for_page(page, query.limit))
                    .with_view(view),
            ));
        }
    });

    (on_page_change, on_view_change)
}

fn header(trail: Vec<(String, Route)>, view: Option<(ViewType, Callback<ViewType>)>) -> Html {
    html! {
        <div class="page-header">
            <Breadcrumbs {trail} />
            if let Some((value, onchange)) = view {
                <ViewToggle {value} {onchange} />
            }
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Seasons

#[derive(Properties, PartialEq)]
pub struct SeasonsPageProps {
    pub query: ListQuery,
}

#[function_component(SeasonsPage)]
pub fn seasons_page(props: &SeasonsPageProps) -> Html {
    let query = props.query;
    let navigator = use_navigator();
    let response = use_query::<SeasonsResponse>(
        api::seasons_url(query.limit, query.offset),
        SEASONS_RETRIES,
    );

    let seasons = match response.state.as_ref() {
        QueryState::Ready(r) => Some(Rc::new(r.data.season_table.seasons.clone())),
        _ => None,
    };
    let pinned = use_pin_item::<Season>(
        seasons,
        PINNED_SEASONS_STORAGE_KEY.to_string(),
        Rc::new(season_key),
        Rc::new(compare_seasons),
    );

    let (on_page_change, on_view_change) = list_callbacks(navigator, query, Route::Seasons);

    let data = match response.state.as_ref() {
        QueryState::Loading => return html! { <Loader /> },
        QueryState::Failed(message) => {
            return html! { <ErrorView message={message.clone()} on_retry={response.refetch.clone()} /> }
        }
        QueryState::Ready(r) => &r.data,
    };

    html! {
        <div class="seasons-list-container">
            { header(vec![("Seasons".into(), Route::seasons())], Some((query.view, on_view_change))) }
            <hr class="divider" />
            {
                match query.view {
                    ViewType::Grid => html! {
                        <SeasonsCardView seasons={pinned.items.clone()} on_toggle={pinned.on_toggle.clone()} />
                    },
                    ViewType::List => html! {
                        <SeasonsInfoView seasons={pinned.items.clone()} on_toggle={pinned.on_toggle.clone()} />
                    },
                }
            }
            <Pagination
                current={current_page(query.offset, query.limit)}
                total={page_count(data.paging.total, query.limit)}
                onchange={on_page_change}
            />
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Races of one season

#[derive(Properties, PartialEq)]
pub struct SeasonRacesPageProps {
    pub year: String,
    pub query: ListQuery,
}

#[function_component(SeasonRacesPage)]
pub fn season_races_page(props: &SeasonRacesPageProps) -> Html {
    let query = props.query;
    let year = props.year.clone();
    let navigator = use_navigator();
    let response = use_query::<RacesResponse>(
        api::season_races_url(&year, query.limit, query.offset),
        DEFAULT_RETRIES,
    );

    let races = match response.state.as_ref() {
        QueryState::Ready(r) => Some(Rc::new(r.data.race_table.races.clone())),
        _ => None,
    };
    let pinned = use_pin_item::<Race>(
        races,
        pinned_races_storage_key(&year),
        Rc::new(race_key),
        Rc::new(compare_races),
    );

    let (on_page_change, on_view_change) = {
        let year = year.clone();
        list_callbacks(navigator, query, move |query| Route::SeasonRaces {
            year: year.clone(),
            query,
        })
    };

    let data = match response.state.as_ref() {
        QueryState::Loading => return html! { <Loader /> },
        QueryState::Failed(message) => {
            return html! { <ErrorView message={message.clone()} on_retry={response.refetch.clone()} /> }
        }
        QueryState::Ready(r) => &r.data,
    };

    let trail = vec![
        ("Seasons".to_string(), Route::seasons()),
        (year.clone(), Route::season_races(&year)),
    ];

    html! {
        <div class="races-list-container">
            { header(trail, Some((query.view, on_view_change))) }
            <hr class="divider" />
            {
                match query.view {
                    ViewType::Grid => html! {
                        <RacesCardView races={pinned.items.clone()} on_toggle={pinned.on_toggle.clone()} />
                    },
                    ViewType::List => html! {
                        <RacesInfoView races={pinned.items.clone()} on_toggle={pinned.on_toggle.clone()} />
                    },
                }
            }
            <Pagination
                current={current_page(query.offset, query.limit)}
                total={page_count(data.paging.total, query.limit)}
                onchange={on_page_change}
            />
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Results of one race

#[derive(Properties, PartialEq)]
pub struct RaceDetailsPageProps {
    pub year: String,
    pub round: String,
}

#[function_component(RaceDetailsPage)]
pub fn race_details_page(props: &RaceDetailsPageProps) -> Html {
    let response = use_query::<RaceDetailsResponse>(
        api::race_results_url(&props.year, &props.round),
        DEFAULT_RETRIES,
    );
    let (search_term, set_search_term) = use_debounced_state(String::new(), SEARCH_DEBOUNCE_MS);

    let details = match response.state.as_ref() {
        QueryState::Ready(r) => Some(r.clone()),
        _ => None,
    };

    // Draw the chart once the canvas is in the DOM; tear it down on change/unmount.
    use_effect_with(details.clone(), |details| {
        if let Some(race) = details.as_ref().and_then(|d| d.data.race()) {
            render_performance_chart(CHART_CANVAS_ID, &performance_series(&race.results));
        }
        || destroy_performance_chart(CHART_CANVAS_ID)
    });

    let details = match response.state.as_ref() {
        QueryState::Loading => return html! { <Loader /> },
        QueryState::Failed(message) => {
            return html! { <ErrorView message={message.clone()} on_retry={response.refetch.clone()} /> }
        }
        QueryState::Ready(r) => r,
    };
    let results = details
        .data
        .race()
        .map(|race| race.results.as_slice())
        .unwrap_or_default();
    let highlighted = highlighted_drivers(results, &search_term);

    let trail = vec![
        ("Seasons".to_string(), Route::seasons()),
        (props.year.clone(), Route::season_races(&props.year)),
        ("Races".to_string(), Route::season_races(&props.year)),
        (
            props.round.clone(),
            Route::race_details(&props.year, &props.round),
        ),
    ];

    html! {
        <div class="race-details-container">
            <div class="page-header">
                <Breadcrumbs {trail} />
                <DriverSearch oninput={set_search_term} />
            </div>

            if results.is_empty() {
                <p class="no-results-message">{ "No results available for this race yet." }</p>
            }

            <div class="card-grid">
                { results.iter().map(|r| html! {
                    <DriverCard
                        key={r.entry_key()}
                        result={r.clone()}
                        highlighted={highlighted.contains(&r.entry_key())}
                    />
                }).collect::<Html>() }
            </div>

            <hr class="divider" />
            <div class="section-title">{ "Drivers Performances" }</div>
            <div class="card chart-card">
                <canvas id={CHART_CANVAS_ID}></canvas>
            </div>
        </div>
    }
}

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="preload-container">
            <p>{ "This page does not exist." }</p>
            <Link to={Route::seasons()}>{ "Back to seasons" }</Link>
        </div>
    }
}
