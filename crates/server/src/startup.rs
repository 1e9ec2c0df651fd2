use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::store::mongo::MongoStore;

use crate::routes;
use crate::state::AppState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3333);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Store connection settings from configs or env vars.
fn load_database() -> (String, String) {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => (cfg.database.url, cfg.database.name),
        Err(_) => {
            let url = env::var("DATABASE_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017/eventos".to_string());
            (url, "eventos".to_string())
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // One store handle for the whole process, passed down to every route
    let (db_url, db_name) = load_database();
    let store = MongoStore::connect(&db_url, &db_name).await?;
    let state = AppState { store: Arc::new(store) };

    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
