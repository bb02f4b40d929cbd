use crate::icons;
use leptos::prelude::*;

/// The search box and location button.
///
/// Neither control does anything yet: the input has no handler and the button no action.
#[component]
pub fn SearchPanel() -> impl IntoView {
    view! {
        <section class="search-panel">
            <h2 class="search-panel__headline">"Find Your Route"</h2>
            <p class="search-panel__subheadline">"Real-time transit information across Canada"</p>
            <div class="search-panel__box">
                <div class="search-panel__field">
                    <span class="icon" aria-hidden="true" inner_html={icons::SEARCH}></span>
                    <input
                        class="search-panel__input"
                        type="text"
                        placeholder="Search for routes, stops, or destinations..."
                    />
                </div>
                <button class="search-panel__location" type="button">
                    <span class="icon" aria-hidden="true" inner_html={icons::NAVIGATION}></span>
                    "Use My Location"
                </button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_copy_and_inert_controls() {
        let html = view! { <SearchPanel /> }.to_html();

        assert!(html.contains("Find Your Route"));
        assert!(html.contains("Real-time transit information across Canada"));
        assert!(html.contains(r#"placeholder="Search for routes, stops, or destinations...""#));
        assert!(html.contains("Use My Location"));
        assert!(!html.contains("<form"));
        assert!(!html.contains("onclick"));
    }
}
