//! Full HTML documents around rendered page bodies.

use crate::theme::Theme;
use leptos::prelude::*;
use tracing::debug;

/// Wraps a rendered body in an HTML5 document.
///
/// The `<head>` carries the page title and the full stylesheet for `theme`.
/// `body` must already be escaped markup, as produced by a view.
pub fn render_document(page_title: &str, theme: &Theme, body: &str) -> String {
    let title_element = view! { <title>{page_title.to_string()}</title> }.to_html();
    let html = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         {title_element}\n\
         <style>\n{css}</style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n",
        css = theme.stylesheet(),
    );
    debug!(title = page_title, bytes = html.len(), "Rendered document");
    html
}
