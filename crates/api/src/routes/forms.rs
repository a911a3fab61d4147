use axum::routing::post;
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// ```text
/// POST /newsletter/subscribe   -> subscribe_newsletter
/// POST /contact                -> send_contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/newsletter/subscribe", post(forms::subscribe_newsletter))
        .route("/contact", post(forms::send_contact))
}
