use crate::components::{PageHeader, RouteArrivalCard, SearchPanel};
use leptos::prelude::*;
use maple_mover_model::RouteSummary;

/// The homepage: search, then a grid of popular routes in the order given.
#[component]
pub fn HomeView(routes: Vec<RouteSummary>) -> impl IntoView {
    let cards = routes
        .into_iter()
        .map(|route| view! { <RouteArrivalCard route=route /> })
        .collect_view();

    view! {
        <PageHeader />
        <main class="container">
            <SearchPanel />
            <section>
                <div class="section-heading">
                    <h2>"Popular Routes"</h2>
                    <p>"Quick access to frequently used transit routes"</p>
                </div>
                <div class="route-grid">{cards}</div>
            </section>
        </main>
        <footer class="page-footer">
            <p>"© 2025 Maple Mover • Canadian Transit Information"</p>
        </footer>
    }
}
