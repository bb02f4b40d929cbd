use crate::icons;
use leptos::prelude::*;

/// The Maple Mover brand mark.
#[component]
pub fn PageHeader() -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="container brand">
                <div class="brand__badge">
                    <span class="icon" aria-hidden="true" inner_html={icons::MAP_PIN}></span>
                </div>
                <div>
                    <h1 class="brand__title">"Maple Mover"</h1>
                    <p class="brand__tagline">"Canadian Transit"</p>
                </div>
            </div>
        </header>
    }
}
