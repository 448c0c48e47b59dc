//! PostgreSQL adapters for the driven repository ports.
//!
//! Row structs and table definitions stay private to this module; only the
//! repositories, the pool and the migration runner are exported.
//!
//! ```no_run
//! use bug_tracker::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tracker")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_comment_repository;
mod diesel_project_repository;
mod diesel_ticket_repository;
mod diesel_user_repository;
mod diesel_workspace_stats_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_ticket_repository::DieselTicketRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_workspace_stats_repository::DieselWorkspaceStatsRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
