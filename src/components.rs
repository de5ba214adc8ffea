//! Pure Yew view components for the F1 seasons UI.
//!
//! This module contains stateless components that render based on props;
//! data fetching and pin state live in the pages and hooks.

use f1_seasons::models::{RaceResult, Season};
use f1_seasons::pin::Pinnable;
use f1_seasons::route::{Route, ViewType};
use f1_seasons::utils::{format_long_date, pagination_items, PageItem};
use f1_seasons::Race;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Pushes a route onto the browser history; provided by the app root.
#[derive(Clone, PartialEq)]
pub struct Navigator {
    navigate: Callback<Route>,
}

impl Navigator {
    pub fn new(navigate: Callback<Route>) -> Self {
        Self { navigate }
    }

    pub fn push(&self, route: Route) {
        self.navigate.emit(route);
    }
}

/// Navigator for the current component, or `None` outside the app root.
#[hook]
pub fn use_navigator() -> Option<Navigator> {
    use_context::<Navigator>()
}

#[derive(Properties, PartialEq)]
pub struct LinkProps {
    pub to: Route,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Anchor that navigates in-app instead of reloading the page.
#[function_component(Link)]
pub fn link(props: &LinkProps) -> Html {
    let navigator = use_navigator();
    let onclick = {
        let to = props.to.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(navigator) = &navigator {
                e.prevent_default();
                navigator.push(to.clone());
            }
        })
    };

    html! {
        <a href={props.to.href()} class={props.class.clone()} {onclick}>
            { props.children.clone() }
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppShellProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(AppShell)]
pub fn app_shell(props: &AppShellProps) -> Html {
    html! {
        <div class="app-layout">
            <div class="heading">
                <span class="flag" aria-hidden="true">{ "🏁" }</span>
                { "F1 Application" }
            </div>
            <div class="content-card">
                { props.children.clone() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BreadcrumbsProps {
    /// (label, target) pairs from the root down to the current page.
    pub trail: Vec<(String, Route)>,
}

#[function_component(Breadcrumbs)]
pub fn breadcrumbs(props: &BreadcrumbsProps) -> Html {
    let last = props.trail.len().saturating_sub(1);
    html! {
        <nav class="breadcrumbs">
            { props.trail.iter().enumerate().map(|(i, (label, to))| {
                html! {
                    <>
                        <Link to={to.clone()}>{ label.clone() }</Link>
                        if i < last {
                            <span class="breadcrumb-separator">{ "/" }</span>
                        }
                    </>
                }
            }).collect::<Html>() }
        </nav>
    }
}

/// List / card segmented control.
#[derive(Properties, PartialEq)]
pub struct ViewToggleProps {
    pub value: ViewType,
    pub onchange: Callback<ViewType>,
}

#[function_component(ViewToggle)]
pub fn view_toggle(props: &ViewToggleProps) -> Html {
    let option = |view: ViewType, label: &'static str| {
        let onchange = props.onchange.clone();
        let class = classes!("segment", (props.value == view).then_some("active"));
        html! {
            <button {class} onclick={Callback::from(move |_| onchange.emit(view))}>
                { label }
            </button>
        }
    };

    html! {
        <div class="view-control" data-testid="view-control">
            { option(ViewType::List, "List View") }
            { option(ViewType::Grid, "Card View") }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub current: u32,
    pub total: u32,
    pub onchange: Callback<u32>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    if props.total == 0 {
        return html! {};
    }

    let button = |page: u32, label: String, disabled: bool, active: bool| {
        let onchange = props.onchange.clone();
        html! {
            <button
                class={classes!("page", active.then_some("active"))}
                {disabled}
                onclick={Callback::from(move |_| onchange.emit(page))}
            >
                { label }
            </button>
        }
    };

    html! {
        <div class="pagination" data-testid="navigation">
            { button(props.current.saturating_sub(1), "‹".into(), props.current <= 1, false) }
            { pagination_items(props.current, props.total).into_iter().map(|item| match item {
                PageItem::Page(page) => button(page, page.to_string(), false, page == props.current),
                PageItem::Gap => html! { <span class="page-gap">{ "…" }</span> },
            }).collect::<Html>() }
            { button(props.current + 1, "›".into(), props.current >= props.total, false) }
        </div>
    }
}

#[function_component(Loader)]
pub fn loader() -> Html {
    html! {
        <div class="preload-container" data-testid="loader-container">
            <div class="loader"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorViewProps {
    pub message: String,
    pub on_retry: Callback<()>,
}

#[function_component(ErrorView)]
pub fn error_view(props: &ErrorViewProps) -> Html {
    let on_retry = props.on_retry.reform(|_: MouseEvent| ());
    html! {
        <div class="preload-container">
            <p>{ "An error has occurred." }</p>
            <p class="error-detail">{ &props.message }</p>
            <button class="btn-primary" onclick={on_retry}>{ "Retry" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PinSwitchProps {
    pub checked: bool,
    pub ontoggle: Callback<()>,
}

#[function_component(PinSwitch)]
pub fn pin_switch(props: &PinSwitchProps) -> Html {
    let onchange = props.ontoggle.reform(|_: Event| ());
    html! {
        <label class="pin-switch">
            <input type="checkbox" checked={props.checked} {onchange} />
            <span>{ "pinned" }</span>
        </label>
    }
}

/// Toggle callback bound to one position of the display order.
fn toggle_at(on_toggle: &Callback<usize>, index: usize) -> Callback<()> {
    on_toggle.reform(move |_| index)
}

#[derive(Properties, PartialEq)]
pub struct SeasonsViewProps {
    pub seasons: Rc<Vec<Pinnable<Season>>>,
    pub on_toggle: Callback<usize>,
}

#[function_component(SeasonsInfoView)]
pub fn seasons_info_view(props: &SeasonsViewProps) -> Html {
    html! {
        <table class="info-table">
            <thead>
                <tr>
                    <th>{ "Season" }</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                { props.seasons.iter().enumerate().map(|(i, s)| html! {
                    <tr key={s.item.season.clone()}>
                        <td>
                            <Link to={Route::season_races(&s.item.season)}>{ s.item.season.clone() }</Link>
                        </td>
                        <td>
                            <PinSwitch checked={s.is_pinned()} ontoggle={toggle_at(&props.on_toggle, i)} />
                        </td>
                    </tr>
                }).collect::<Html>() }
            </tbody>
        </table>
    }
}

#[function_component(SeasonsCardView)]
pub fn seasons_card_view(props: &SeasonsViewProps) -> Html {
    html! {
        <div class="card-grid">
            { props.seasons.iter().enumerate().map(|(i, s)| html! {
                <div class="card season-card" key={s.item.season.clone()}>
                    <PinSwitch checked={s.is_pinned()} ontoggle={toggle_at(&props.on_toggle, i)} />
                    <Link to={Route::season_races(&s.item.season)} class="season-card-link">
                        <span class="card-caption">{ "year" }</span>
                        <span class="card-title">{ s.item.season.clone() }</span>
                    </Link>
                </div>
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RacesViewProps {
    pub races: Rc<Vec<Pinnable<Race>>>,
    pub on_toggle: Callback<usize>,
}

#[function_component(RacesInfoView)]
pub fn races_info_view(props: &RacesViewProps) -> Html {
    html! {
        <table class="info-table">
            <thead>
                <tr>
                    <th>{ "Race Name" }</th>
                    <th>{ "Circuit Name" }</th>
                    <th>{ "Date" }</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                { props.races.iter().enumerate().map(|(i, r)| html! {
                    <tr key={r.item.race_name.clone()}>
                        <td>
                            <Link to={Route::race_details(&r.item.season, &r.item.round)}>
                                { r.item.race_name.clone() }
                            </Link>
                        </td>
                        <td>{ r.item.circuit.circuit_name.clone() }</td>
                        <td>{ format_long_date(&r.item.date) }</td>
                        <td>
                            <PinSwitch checked={r.is_pinned()} ontoggle={toggle_at(&props.on_toggle, i)} />
                        </td>
                    </tr>
                }).collect::<Html>() }
            </tbody>
        </table>
    }
}

#[function_component(RacesCardView)]
pub fn races_card_view(props: &RacesViewProps) -> Html {
    html! {
        <div class="card-grid">
            { props.races.iter().enumerate().map(|(i, r)| html! {
                <div class="card race-card" key={r.item.race_name.clone()}>
                    <PinSwitch checked={r.is_pinned()} ontoggle={toggle_at(&props.on_toggle, i)} />
                    <Link to={Route::race_details(&r.item.season, &r.item.round)} class="race-name">
                        { r.item.race_name.clone() }
                    </Link>
                    <hr />
                    <div class="card-row">
                        <span><b>{ "Circuit: " }</b>{ r.item.circuit.circuit_name.clone() }</span>
                        <span>{ format_long_date(&r.item.date) }</span>
                    </div>
                </div>
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DriverSearchProps {
    pub oninput: Callback<String>,
}

#[function_component(DriverSearch)]
pub fn driver_search(props: &DriverSearchProps) -> Html {
    let oninput = props.oninput.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });
    html! {
        <input
            type="search"
            class="driver-search"
            placeholder="Search by driver's name"
            {oninput}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct DriverCardProps {
    pub result: RaceResult,
    pub highlighted: bool,
}

#[function_component(DriverCard)]
pub fn driver_card(props: &DriverCardProps) -> Html {
    let r = &props.result;
    html! {
        <div class="card driver-card" data-testid="driver-card">
            <div>
                <span class="driver-position">{ format!("#{}", r.position) }</span>
                <span class={classes!(props.highlighted.then_some("highlighted-driver-name"))}>
                    { r.driver_name() }
                </span>
            </div>
            <hr />
            <div class="card-row">
                <p><b>{ r.constructor.name.clone() }</b></p>
                <p data-testid="nationality"><b>{ "Nationality: " }</b>{ r.driver.nationality.clone() }</p>
            </div>
        </div>
    }
}
