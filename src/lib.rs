#[macro_use]
extern crate tracing;

use std::sync::Arc;

use axum::Router;
use axum_extra::middleware::option_layer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod middleware;
pub mod trace;
pub mod util;

pub use config::{Config, LookupConfig};
pub use error::Error;
pub use geo::{Identifier, Location, Locator, Provider, RequestContext};

#[derive(Clone)]
pub struct AppState {
    pub locator: Arc<Locator>,
    pub trust_forwarded_for: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let locator = Locator::new(config.lookup.clone())?;
        Ok(Self {
            locator: Arc::new(locator),
            trust_forwarded_for: config.trust_forwarded_for,
        })
    }
}

pub fn app(state: AppState, debug: bool) -> Router {
    let cors = if debug {
        Some(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods(Any)
                .allow_origin(Any),
        )
    } else {
        None
    };
    let cors = option_layer(cors);
    let layer = ServiceBuilder::new()
        .layer(middleware::TraceLayer)
        .layer(cors);

    Router::new()
        .nest("/api", api::routes())
        .layer(layer)
        .with_state(state)
}
