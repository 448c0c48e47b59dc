//! Bug tracker entry-point: loads settings, selects storage and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bug_tracker::inbound::http::health::HealthState;
use bug_tracker::inbound::http::session_config::{BuildMode, session_settings_from_env};
use bug_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| {
        std::io::Error::other(format!("failed to load server settings: {err}"))
    })?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(session, settings.bind_addr()?);

    if let Some(url) = settings.database_url() {
        if settings.run_migrations() {
            run_pending_migrations(url)
                .await
                .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
            info!("database migrations applied");
        }
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections))
            .await
            .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
