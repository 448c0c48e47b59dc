//! Driving port for the workspace statistics use case.

use async_trait::async_trait;

use crate::domain::{Error, UserId, WorkspaceStats};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceStatsQuery: Send + Sync {
    async fn compute_stats(&self, caller: &UserId) -> Result<WorkspaceStats, Error>;
}
