//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use actix_web::web;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use url::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use civicwatch_backend::inbound::http::health::HealthState;
use civicwatch_backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply all pending migrations before accepting traffic.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|error| std::io::Error::other(format!("database connection failed: {error}")))?;
    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| std::io::Error::other(format!("migrations failed: {error}")))?;
    Ok(())
}

fn bind_addr_from_env() -> std::io::Result<SocketAddr> {
    let raw = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    raw.parse()
        .map_err(|error| std::io::Error::other(format!("invalid BIND_ADDR {raw}: {error}")))
}

fn authority_url_from_env() -> std::io::Result<Option<Url>> {
    match env::var("AUTHORITY_URL") {
        Ok(raw) => {
            let url = Url::parse(&raw).map_err(|error| {
                std::io::Error::other(format!("invalid AUTHORITY_URL {raw}: {error}"))
            })?;
            Ok(Some(url))
        }
        Err(_) => Ok(None),
    }
}

fn authority_timeout_from_env() -> Duration {
    env::var("AUTHORITY_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .map_or(Duration::from_secs(3), Duration::from_secs)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = bind_addr_from_env()?;
    let mut config = ServerConfig::new(bind_addr).with_authority_timeout(authority_timeout_from_env());

    match authority_url_from_env()? {
        Some(url) => config = config.with_authority_url(url),
        None => warn!("AUTHORITY_URL not set; forwarded summaries are discarded"),
    }

    match env::var("DATABASE_URL") {
        Ok(database_url) => {
            run_migrations(&database_url)?;
            let pool = DbPool::new(PoolConfig::new(&database_url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        Err(_) => warn!("DATABASE_URL not set; serving fixture-backed responses"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    let server = server::create_server(health_state, config)?;
    server.await
}
