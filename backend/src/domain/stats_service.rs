//! Workspace statistics use case.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{WorkspaceStatsQuery, WorkspaceStatsRepository};
use crate::domain::{Error, UserId, WorkspaceStats};

/// Delegates to one repository call so the counts come from one snapshot.
#[derive(Clone)]
pub struct WorkspaceStatsService<S> {
    stats: Arc<S>,
}

impl<S> WorkspaceStatsService<S> {
    pub fn new(stats: Arc<S>) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl<S> WorkspaceStatsQuery for WorkspaceStatsService<S>
where
    S: WorkspaceStatsRepository,
{
    async fn compute_stats(&self, caller: &UserId) -> Result<WorkspaceStats, Error> {
        Ok(self.stats.snapshot_for_member(caller).await?)
    }
}
