use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use pokefumi_server::{
    config::Settings,
    cors,
    db::{MemoryStore, PgStore, Store},
    game::coordinator::GameCoordinator,
    http, metrics,
    oracle::PokeApiClient,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Configuration
    let settings = Settings::from_env().context("invalid configuration")?;

    // Record store
    let store: Arc<dyn Store> = match &settings.database_url {
        Some(url) => {
            let pg = PgStore::connect(url, settings.db_max_connections)
                .await
                .context("failed to open Postgres pool")?;
            log::info!("connected to Postgres ({} connections)", settings.db_max_connections);
            Arc::new(pg)
        }
        None => {
            log::warn!("DATABASE_URL not set; using the in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    // Reference data
    let oracle = Arc::new(PokeApiClient::new(settings.pokeapi_url.clone()));

    let game = GameCoordinator::new(store.clone(), oracle);
    let prometheus = metrics::build()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to build metrics middleware")?;

    let origins = settings.cors_allowed_origins.clone();
    if origins.is_empty() {
        log::info!("CORS: any origin allowed");
    }

    log::info!("listening on {}", settings.server_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .wrap(cors::cors_middleware(&origins))
            .app_data(web::Data::new(game.clone()))
            .configure(http::routes::init_routes)
    })
    .bind(&settings.server_addr)
    .with_context(|| format!("cannot bind {}", settings.server_addr))?
    .run()
    .await?;

    store.close().await;
    log::info!("shut down");
    Ok(())
}
