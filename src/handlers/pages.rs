//! Static page handlers.

use axum::response::Html;

use crate::views;

/// Landing page with the wallet address form.
pub async fn landing_page() -> Html<&'static str> {
    Html(views::LANDING_PAGE)
}
