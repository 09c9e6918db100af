#[macro_use]
extern crate tracing;

use std::net::SocketAddr;

use dotenvy::dotenv;
use tokio::net::TcpListener;

use ipgeo::{AppState, Provider, config, trace};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    launch_info();
    dotenv().ok();
    let config = config::init_config();
    trace::init(&config.log);

    if let Err(err) = Provider::from_config(config.lookup.provider.as_deref()) {
        warn!("{}, lookups will fail until it is set", err);
    }

    let state = AppState::new(&config).unwrap();
    let app = ipgeo::app(state, config.debug);

    let listener = TcpListener::bind(config.addr).await.unwrap();
    let local_addr = listener.local_addr().unwrap();
    info!("listening on http://{}", local_addr);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    );
    tokio::select! {
        result = server => {
            if let Err(err) = result {
                error!("server error: {}", err);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    };
}

fn launch_info() {
    println!();
    println!(
        "=================== Starting ipgeo {} ===================",
        env!("CARGO_PKG_VERSION")
    );
    println!();
}
