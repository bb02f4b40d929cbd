mod page_header;
mod route_card;
mod search_panel;

pub use page_header::PageHeader;
pub use route_card::RouteArrivalCard;
pub use search_panel::SearchPanel;
