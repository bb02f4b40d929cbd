//! Built-in route literals shown by the homepage and the card preview.
//!
//! These are sample values, not live data.

use crate::{ArrivalEntry, RouteSummary};

/// The three "Popular Routes" shown on the homepage, in display order.
pub fn featured_routes() -> Vec<RouteSummary> {
    vec![
        RouteSummary::new(
            "504",
            "King Streetcar",
            "King St West At Yonge St",
            "King Station",
            vec![
                ArrivalEntry::primary("2 min"),
                ArrivalEntry::plain("in 13 mins"),
                ArrivalEntry::plain("in 27 mins"),
            ],
        ),
        RouteSummary::new(
            "95",
            "York Mills",
            "York Mills Station",
            "York Mills Terminal",
            vec![
                ArrivalEntry::primary("5 min"),
                ArrivalEntry::plain("in 18 mins"),
                ArrivalEntry::plain("in 35 mins"),
            ],
        ),
        RouteSummary::new(
            "320",
            "Yonge Express",
            "Yonge St At Bloor St",
            "Bloor-Yonge Station",
            vec![
                ArrivalEntry::primary("1 min"),
                ArrivalEntry::plain("in 8 mins"),
                ArrivalEntry::plain("in 15 mins"),
            ],
        ),
    ]
}

/// The route shown by the standalone card preview.
///
/// It carries four arrivals (one more than the homepage cards)
/// so the preview exercises a longer list.
pub fn card_demo_route() -> RouteSummary {
    RouteSummary::new(
        "504",
        "504-King West",
        "King St West At Yonge St West Side",
        "King Station",
        vec![
            ArrivalEntry::primary("13 min"),
            ArrivalEntry::plain("in 13 mins"),
            ArrivalEntry::plain("in 27 mins"),
            ArrivalEntry::plain("in 33 mins"),
        ],
    )
}
