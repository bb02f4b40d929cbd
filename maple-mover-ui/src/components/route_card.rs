use crate::presentation::arrival_rows;
use leptos::prelude::*;
use maple_mover_model::RouteSummary;

const SEPARATOR: &str = "•";

/// A card for one route: number, name, upcoming arrivals and where the route ends.
///
/// Blank fields render as empty regions.
#[component]
pub fn RouteArrivalCard(route: RouteSummary) -> impl IntoView {
    let RouteSummary {
        route_number,
        route_name,
        location,
        station,
        arrival_times,
    } = route;

    let rows = arrival_rows(arrival_times)
        .into_iter()
        .map(|row| {
            let separator = row.separated.then(|| {
                view! { <span class="arrival-separator" aria-hidden="true">{SEPARATOR}</span> }
            });
            view! {
                <li class={row.emphasis.class()}>
                    <span class="arrival__label">{row.label}</span>
                    {separator}
                </li>
            }
        })
        .collect_view();

    view! {
        <article class="route-card">
            <div class="route-card__number">{route_number}</div>
            <div class="route-card__name">{route_name}</div>
            <ol class="route-card__arrivals">{rows}</ol>
            <div class="route-card__terminus">
                <span class="route-card__caption">"Last stop"</span>
                <span class="route-card__location">{location}</span>
                <span class="route-card__station">{station}</span>
            </div>
        </article>
    }
}
