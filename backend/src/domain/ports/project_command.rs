//! Driving port for project mutations.

use async_trait::async_trait;

use crate::domain::{Error, ProjectDescription, ProjectId, ProjectName, ProjectPatch, UserId};

use super::ProjectView;

/// Validated project creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub name: ProjectName,
    pub description: ProjectDescription,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Create a project owned by `caller`, who becomes its only member.
    async fn create(
        &self,
        caller: &UserId,
        request: CreateProjectRequest,
    ) -> Result<ProjectView, Error>;

    /// Owner-only. Adding an existing member is a no-op.
    async fn add_member(
        &self,
        caller: &UserId,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<ProjectView, Error>;

    /// Member-only partial update.
    async fn update(
        &self,
        caller: &UserId,
        project: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<ProjectView, Error>;

    /// Owner-only. Tickets referencing the project are left in place.
    async fn delete(&self, caller: &UserId, project: &ProjectId) -> Result<(), Error>;
}
