//! Service entry point: load settings, prepare the user store and serve.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use user_service::server::{
    ServerConfig, ServerSettings, create_server, drain_on, shutdown_signal,
};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os()).wrap_err("load settings")?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    if let Some(url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping schema migrations");
        } else {
            let url = url.to_owned();
            let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
                .await
                .wrap_err("migration task panicked")??;
            info!(applied, "schema up to date");
        }
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.max_connections()))
            .await
            .wrap_err("build database pool")?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database URL configured; users are kept in memory");
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(user_service::server::build_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await?;
    Ok(())
}
