use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::{error, info, warn};

use mergington::config::ServerConfig;
use mergington::database::schema;
use mergington::web::app::build_router;

#[tokio::main]
async fn main() {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    // 2. Verbind met de database en zaai de standaard activiteiten
    info!("Verbinden met database: {}", config.database_url);
    let pool = match schema::connect_and_prepare(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Kan database niet voorbereiden: {}", e);
            std::process::exit(1);
        }
    };

    // 3. Bouw de applicatie
    let app = build_router(pool, &config.static_dir);

    // 4. Start de server (met fallback poort)
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Kan host/port niet parsen: {}", e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), config.port.saturating_add(1));
            warn!(
                "Kon niet binden op {}: {}. Probeer fallback {}",
                addr, e, fallback
            );
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    error!("Kan niet binden op fallback poort: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(bound) => info!("Server draait op http://{}", bound),
        Err(e) => warn!("Onbekend lokaal adres: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server gestopt: {}", e);
        std::process::exit(1);
    }
}
