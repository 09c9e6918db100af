use axum::Router;
use axum::http::StatusCode;

use crate::AppState;

mod lookup;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/lookup", lookup::routes())
        .fallback(|| async { StatusCode::NOT_FOUND })
}
