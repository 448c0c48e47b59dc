//! Driven port answering the workspace statistics aggregate.
//!
//! Adapters must read the project set and the ticket set from one consistent
//! snapshot: a single SQL statement or a single lock acquisition.

use async_trait::async_trait;

use crate::domain::{UserId, WorkspaceStats};

use super::define_port_error;

define_port_error! {
    /// Errors raised while computing workspace statistics.
    pub enum WorkspaceStatsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            InternalError: "workspace stats connection failed: {message}",
        /// Aggregate query failed during execution.
        Query { message: String } =>
            InternalError: "workspace stats query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceStatsRepository: Send + Sync {
    /// Count the projects listing `member` and the tickets inside them.
    async fn snapshot_for_member(
        &self,
        member: &UserId,
    ) -> Result<WorkspaceStats, WorkspaceStatsRepositoryError>;
}
