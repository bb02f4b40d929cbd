#![doc = include_str!("../README.md")]

pub mod components;
pub mod document;
pub mod icons;
pub mod presentation;
pub mod theme;
pub mod views;

use leptos::prelude::*;
use maple_mover_model::RouteSummary;
use maple_mover_model::featured::{card_demo_route, featured_routes};
use theme::Theme;
use views::{CardDemoView, HomeView, ResultsOutcome, ResultsView};

/// The homepage with the featured routes.
pub fn home_page() -> String {
    home_page_with(featured_routes(), &Theme::default())
}

/// The homepage with any list of routes.
pub fn home_page_with(routes: Vec<RouteSummary>, theme: &Theme) -> String {
    let body = render(move || view! { <HomeView routes=routes /> });
    document::render_document("Maple Mover", theme, &body)
}

/// The single-card preview page.
pub fn card_page() -> String {
    card_page_with(card_demo_route(), &Theme::default())
}

pub fn card_page_with(route: RouteSummary, theme: &Theme) -> String {
    let body = render(move || view! { <CardDemoView route=route /> });
    document::render_document("Maple Mover | Route Card", theme, &body)
}

/// A results page for a stop lookup.
pub fn results_page(heading: &str, outcome: ResultsOutcome, theme: &Theme) -> String {
    let title = format!("Maple Mover | {heading}");
    let heading = heading.to_string();
    let body = render(move || view! { <ResultsView heading=heading outcome=outcome /> });
    document::render_document(&title, theme, &body)
}

/// Renders a view to HTML under a fresh reactive owner.
fn render<V: IntoView>(view: impl FnOnce() -> V) -> String {
    Owner::new().with(|| view().to_html())
}
