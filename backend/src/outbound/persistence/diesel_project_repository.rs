//! PostgreSQL-backed `ProjectRepository`.
//!
//! A new project and its member list are written in one transaction. Members
//! keep their insertion order through the `position` column; appends lock the
//! project row so concurrent additions get distinct positions.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{
    Project, ProjectDescription, ProjectDraft, ProjectId, ProjectName, ProjectPatch,
    ProjectValidationError, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MemberRow, NewProjectRow, ProjectRow, ProjectUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{project_members, projects};

#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    map_basic_pool_error(error, ProjectRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    map_basic_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

fn member_rows(project: &Project) -> Result<Vec<MemberRow>, ProjectRepositoryError> {
    project
        .members()
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let position = i32::try_from(index)
                .map_err(|_| ProjectRepositoryError::query("member list is too long"))?;
            Ok(MemberRow {
                project_id: *project.id().as_uuid(),
                user_id: *member.as_uuid(),
                position,
            })
        })
        .collect()
}

fn row_to_project(
    row: ProjectRow,
    mut members: Vec<MemberRow>,
) -> Result<Project, ProjectRepositoryError> {
    let invalid = |err: ProjectValidationError| {
        warn!(project_id = %row.id, error = %err, "stored project failed validation");
        ProjectRepositoryError::query("stored project is invalid")
    };
    members.sort_by_key(|member| member.position);
    let draft = ProjectDraft {
        id: ProjectId::from_uuid(row.id),
        name: ProjectName::new(&row.name).map_err(invalid)?,
        description: ProjectDescription::new(row.description.clone()).map_err(invalid)?,
        owner: UserId::from_uuid(row.owner_id),
        members: members
            .into_iter()
            .map(|member| UserId::from_uuid(member.user_id))
            .collect(),
        created_at: row.created_at,
    };
    Project::restore(draft).map_err(invalid)
}

fn assemble(
    rows: Vec<ProjectRow>,
    members: Vec<MemberRow>,
) -> Result<Vec<Project>, ProjectRepositoryError> {
    let mut grouped: HashMap<Uuid, Vec<MemberRow>> = HashMap::new();
    for member in members {
        grouped.entry(member.project_id).or_default().push(member);
    }
    rows.into_iter()
        .map(|row| {
            let members = grouped.remove(&row.id).unwrap_or_default();
            row_to_project(row, members)
        })
        .collect()
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewProjectRow {
            id: *project.id().as_uuid(),
            name: project.name().as_str(),
            description: project.description().as_str(),
            owner_id: *project.owner().as_uuid(),
            created_at: project.created_at(),
        };
        let members = member_rows(project)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(projects::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(project_members::table)
                    .values(&members)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn add_member(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let project_id = *project.as_uuid();
        let user_id = *member.as_uuid();

        conn.transaction(|conn| {
            async move {
                let locked: Option<Uuid> = projects::table
                    .find(project_id)
                    .select(projects::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if locked.is_none() {
                    return Ok(false);
                }
                let last: Option<i32> = project_members::table
                    .filter(project_members::project_id.eq(project_id))
                    .select(max(project_members::position))
                    .first(conn)
                    .await?;
                let row = MemberRow {
                    project_id,
                    user_id,
                    position: last.map_or(0, |position| position.saturating_add(1)),
                };
                diesel::insert_into(project_members::table)
                    .values(&row)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update_details(
        &self,
        project: &ProjectId,
        patch: &ProjectPatch,
    ) -> Result<bool, ProjectRepositoryError> {
        if patch.is_empty() {
            return Ok(self.find_by_id(project).await?.is_some());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ProjectUpdate {
            name: patch.name.as_ref().map(ProjectName::as_str),
            description: patch.description.as_ref().map(ProjectDescription::as_str),
        };
        let updated = diesel::update(projects::table.find(project.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let project_id = *id.as_uuid();

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let row: Option<ProjectRow> = projects::table
                        .find(project_id)
                        .select(ProjectRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    let members: Vec<MemberRow> = project_members::table
                        .filter(project_members::project_id.eq(project_id))
                        .select(MemberRow::as_select())
                        .load(conn)
                        .await?;
                    Ok(Some((row, members)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, members)| row_to_project(row, members))
            .transpose()
    }

    async fn list_for_member(
        &self,
        member: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let member_id = *member.as_uuid();

        let (rows, members) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<ProjectRow> = projects::table
                        .inner_join(project_members::table)
                        .filter(project_members::user_id.eq(member_id))
                        .order((projects::created_at.asc(), projects::seq.asc()))
                        .select(ProjectRow::as_select())
                        .load(conn)
                        .await?;
                    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
                    let members: Vec<MemberRow> = project_members::table
                        .filter(project_members::project_id.eq_any(ids))
                        .select(MemberRow::as_select())
                        .load(conn)
                        .await?;
                    Ok((rows, members))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        assemble(rows, members)
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Memberships cascade; tickets keep their dangling project reference.
        let deleted = diesel::delete(projects::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
