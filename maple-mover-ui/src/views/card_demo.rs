use crate::components::RouteArrivalCard;
use leptos::prelude::*;
use maple_mover_model::RouteSummary;

/// A single card, centred on the page.
#[component]
pub fn CardDemoView(route: RouteSummary) -> impl IntoView {
    view! {
        <main class="card-stage">
            <RouteArrivalCard route=route />
        </main>
    }
}
