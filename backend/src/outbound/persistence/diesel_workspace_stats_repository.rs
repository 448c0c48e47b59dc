//! PostgreSQL-backed `WorkspaceStatsRepository`.
//!
//! Project and ticket counts come from one statement, so both tallies see
//! the same snapshot. Orphaned tickets drop out through the join.

use async_trait::async_trait;
use diesel::sql_types::{BigInt, Uuid as SqlUuid};
use diesel::{QueryableByName, sql_query};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{WorkspaceStatsRepository, WorkspaceStatsRepositoryError};
use crate::domain::{StatusCounts, UserId, WorkspaceStats};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};

const SNAPSHOT_SQL: &str = r"
WITH member_projects AS (
    SELECT project_id FROM project_members WHERE user_id = $1
)
SELECT
    (SELECT COUNT(*) FROM member_projects) AS projects,
    COUNT(*) FILTER (WHERE t.status = 'todo') AS todo,
    COUNT(*) FILTER (WHERE t.status = 'in-progress') AS in_progress,
    COUNT(*) FILTER (WHERE t.status = 'done') AS done
FROM tickets t
JOIN member_projects mp ON mp.project_id = t.project_id
";

#[derive(Debug, QueryableByName)]
struct SnapshotRow {
    #[diesel(sql_type = BigInt)]
    projects: i64,
    #[diesel(sql_type = BigInt)]
    todo: i64,
    #[diesel(sql_type = BigInt)]
    in_progress: i64,
    #[diesel(sql_type = BigInt)]
    done: i64,
}

#[derive(Clone)]
pub struct DieselWorkspaceStatsRepository {
    pool: DbPool,
}

impl DieselWorkspaceStatsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WorkspaceStatsRepositoryError {
    map_basic_pool_error(error, WorkspaceStatsRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> WorkspaceStatsRepositoryError {
    map_basic_diesel_error(
        error,
        WorkspaceStatsRepositoryError::query,
        WorkspaceStatsRepositoryError::connection,
    )
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

impl From<SnapshotRow> for WorkspaceStats {
    fn from(row: SnapshotRow) -> Self {
        Self::new(
            count(row.projects),
            StatusCounts {
                todo: count(row.todo),
                in_progress: count(row.in_progress),
                done: count(row.done),
            },
        )
    }
}

#[async_trait]
impl WorkspaceStatsRepository for DieselWorkspaceStatsRepository {
    async fn snapshot_for_member(
        &self,
        member: &UserId,
    ) -> Result<WorkspaceStats, WorkspaceStatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: SnapshotRow = sql_query(SNAPSHOT_SQL)
            .bind::<SqlUuid, _>(*member.as_uuid())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn snapshot_rows_convert_to_stats() {
        let stats = WorkspaceStats::from(SnapshotRow {
            projects: 2,
            todo: 3,
            in_progress: 1,
            done: 4,
        });
        assert_eq!(stats.projects(), 2);
        assert_eq!(stats.tickets(), 8);
        assert_eq!(stats.in_progress(), 1);
    }

    #[rstest]
    fn negative_counts_clamp_to_zero() {
        assert_eq!(count(-1), 0);
    }
}
