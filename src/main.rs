use axum::Server;
use clap::Parser;
use managemate_backend::{
    AppState,
    config::{Config, ServerConfig},
    db, init_tracing, routes,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Parser, Debug)]
#[command(name = "managemate", about = "ManageMate project management API server")]
struct Args {
    /// Overrides SERVER_HOST
    #[arg(long)]
    host: Option<String>,

    /// Overrides SERVER_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    init_tracing(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server terminated: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = db::build_pool(&config.database())?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "Database pool initialized"
    );

    let redis = redis::Client::open(config.redis().url)?;

    let addr: SocketAddr = config.server_address().parse()?;
    let cors = cors_layer(&config.server());

    let state = Arc::new(AppState::new(db, redis, config));
    let app = routes::create_router(state).layer(cors);

    tracing::info!("Server running at http://{}", addr);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if server.cors_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
