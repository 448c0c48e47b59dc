//! Selects the storage adapters behind the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use bug_tracker::inbound::http::state::{HttpState, Repositories};
use bug_tracker::outbound::credentials::Argon2PasswordHasher;
use bug_tracker::outbound::memory::InMemoryStore;
use bug_tracker::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselProjectRepository, DieselTicketRepository,
    DieselUserRepository, DieselWorkspaceStatsRepository,
};

use super::ServerConfig;

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselUserRepository,
    DieselProjectRepository,
    DieselTicketRepository,
    DieselCommentRepository,
    DieselWorkspaceStatsRepository,
> {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        projects: Arc::new(DieselProjectRepository::new(pool.clone())),
        tickets: Arc::new(DieselTicketRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        stats: Arc::new(DieselWorkspaceStatsRepository::new(pool.clone())),
    }
}

/// PostgreSQL adapters when a pool is configured, otherwise one shared
/// in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::new(Argon2PasswordHasher::default());
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            HttpState::from_repositories(diesel_repositories(pool), hasher, clock)
        }
        None => {
            info!("no database configured; data lives in memory only");
            HttpState::from_repositories(
                Repositories::shared(Arc::new(InMemoryStore::new())),
                hasher,
                clock,
            )
        }
    }
}
