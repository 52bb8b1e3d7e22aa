//! Ticketing service entry-point: loads settings, prepares the ticket store
//! and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ticketing::domain::tickets::PolicyTable;
use ticketing::inbound::http::health::HealthState;
use ticketing::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ticketing::settings::ServerSettings;

use server::{ServerConfig, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;

    let policies = if settings.strike_off_enabled {
        info!("strikeOff tickets enabled");
        PolicyTable::standard().with_strike_off()
    } else {
        PolicyTable::standard()
    };
    let mut config = ServerConfig::new(settings.bind_addr()?).with_policies(policies);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting ticketing server");
    create_server(health_state, config)?.await
}
