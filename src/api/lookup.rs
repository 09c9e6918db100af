use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    routing::get,
};

use crate::{AppState, Error, geo::Location, util::request_context};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(lookup_caller))
        .route("/{identifier}", get(lookup_identifier))
}

async fn lookup_caller(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<Option<Location>>, Error> {
    let context = request_context(peer, &headers, state.trust_forwarded_for);
    let location = state.locator.lookup(context).await?;
    Ok(Json(location))
}

async fn lookup_identifier(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<Option<Location>>, Error> {
    let location = state.locator.lookup(identifier).await?;
    Ok(Json(location))
}
