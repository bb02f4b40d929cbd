mod card_demo;
mod home;
mod results;

pub use card_demo::CardDemoView;
pub use home::HomeView;
pub use results::{ResultsOutcome, ResultsView, StopResults};
