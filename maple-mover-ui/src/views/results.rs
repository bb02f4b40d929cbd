use crate::components::{PageHeader, RouteArrivalCard};
use leptos::prelude::*;
use maple_mover_model::RouteSummary;
use maple_mover_model::arrival::{BOARD_SIZE, pad_arrivals};

/// Route cards for one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopResults {
    pub title: String,
    /// Preformatted distance ("350m"), when the lookup had a location.
    pub distance: Option<String>,
    pub routes: Vec<RouteSummary>,
}

/// What a lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsOutcome {
    Found(Vec<StopResults>),
    NoRoutes,
    OutsideServiceArea,
}

impl ResultsOutcome {
    /// `Found`, unless there is nothing to show.
    pub fn from_stops(stops: Vec<StopResults>) -> Self {
        if stops.iter().all(|stop| stop.routes.is_empty()) {
            ResultsOutcome::NoRoutes
        } else {
            ResultsOutcome::Found(stops)
        }
    }
}

/// Lookup results: each stop's cards in a scrolling row, or a message when there are none.
#[component]
pub fn ResultsView(heading: String, outcome: ResultsOutcome) -> impl IntoView {
    let body = match outcome {
        ResultsOutcome::Found(stops) => stops
            .into_iter()
            .filter(|stop| !stop.routes.is_empty())
            .map(|stop| view! { <StopSection stop=stop /> })
            .collect_view()
            .into_any(),
        ResultsOutcome::NoRoutes => view! {
            <EmptyState
                title="No Transit Routes Found"
                hint="Try searching for a different location in Toronto"
            />
        }
        .into_any(),
        ResultsOutcome::OutsideServiceArea => view! {
            <EmptyState
                title="Outside the Service Area"
                hint="Maple Mover currently covers Toronto only"
            />
        }
        .into_any(),
    };

    view! {
        <PageHeader />
        <main class="container">
            <div class="section-heading">
                <h2>{heading}</h2>
            </div>
            {body}
        </main>
    }
}

#[component]
fn StopSection(stop: StopResults) -> impl IntoView {
    let cards = stop
        .routes
        .into_iter()
        .map(|route| {
            // Results use a fixed board so cards in a row line up.
            let route = RouteSummary {
                arrival_times: pad_arrivals(route.arrival_times, BOARD_SIZE),
                ..route
            };
            view! { <RouteArrivalCard route=route /> }
        })
        .collect_view();

    view! {
        <section class="stop-results">
            <h3 class="stop-results__caption">
                <span>{stop.title}</span>
                {stop
                    .distance
                    .map(|distance| view! { <span class="stop-results__distance">{distance}</span> })}
            </h3>
            <div class="route-row">{cards}</div>
        </section>
    }
}

#[component]
fn EmptyState(title: &'static str, hint: &'static str) -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>{title}</h2>
            <p>{hint}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maple_mover_model::ArrivalEntry;
    use maple_mover_model::arrival::PLACEHOLDER_LABEL;

    fn render(outcome: ResultsOutcome) -> String {
        view! { <ResultsView heading="Near King St".to_string() outcome=outcome /> }.to_html()
    }

    fn stop(title: &str, distance: Option<&str>, routes: Vec<RouteSummary>) -> StopResults {
        StopResults {
            title: title.to_string(),
            distance: distance.map(str::to_string),
            routes,
        }
    }

    fn route(number: &str, arrivals: Vec<ArrivalEntry>) -> RouteSummary {
        RouteSummary::new(number, "Test", "Somewhere", "Elsewhere", arrivals)
    }

    #[test]
    fn stops_with_captions_and_padded_boards() {
        let html = render(ResultsOutcome::Found(vec![
            stop(
                "King St West At Yonge St",
                Some("243m"),
                vec![route("504", vec![ArrivalEntry::primary("2 min")])],
            ),
            stop(
                "Yonge St At Queen St",
                Some("473m"),
                vec![route("97", vec![]), route("501", vec![])],
            ),
        ]));

        assert_eq!(html.matches(r#"class="stop-results""#).count(), 2);
        assert_eq!(html.matches(r#"class="route-card""#).count(), 3);
        assert!(html.contains("243m"));
        assert!(html.contains("473m"));
        // Every card has four rows, padded with placeholders.
        assert_eq!(html.matches(r#"<li class="arrival "#).count(), 3 * BOARD_SIZE);
        assert_eq!(
            html.matches(&format!(">{PLACEHOLDER_LABEL}</span>")).count(),
            3 * BOARD_SIZE - 1
        );
        assert!(html.find("King St West").unwrap() < html.find("Yonge St At Queen").unwrap());
    }

    #[test]
    fn caption_without_distance() {
        let html = render(ResultsOutcome::Found(vec![stop(
            "York Mills Station",
            None,
            vec![route("95", vec![ArrivalEntry::primary("5 min")])],
        )]));

        assert!(html.contains("York Mills Station"));
        assert!(!html.contains("stop-results__distance"));
    }

    #[test]
    fn empty_state() {
        let html = render(ResultsOutcome::from_stops(vec![stop("Quiet stop", None, vec![])]));

        assert!(html.contains("No Transit Routes Found"));
        assert!(html.contains("Try searching for a different location in Toronto"));
        assert!(!html.contains("Quiet stop"));
    }

    #[test]
    fn outside_service_area() {
        let html = render(ResultsOutcome::OutsideServiceArea);

        assert!(html.contains("Maple Mover currently covers Toronto only"));
        assert!(!html.contains("route-card"));
    }

    #[test]
    fn outcome_from_stops() {
        assert_eq!(ResultsOutcome::from_stops(vec![]), ResultsOutcome::NoRoutes);

        let found = vec![stop("A", None, vec![route("1", vec![])])];
        assert_eq!(
            ResultsOutcome::from_stops(found.clone()),
            ResultsOutcome::Found(found)
        );
    }
}
