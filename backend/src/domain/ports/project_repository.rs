//! Driven port for project persistence, including the member set.
//!
//! After creation, writes touch only the member or fields being changed.

use async_trait::async_trait;

use crate::domain::{Project, ProjectId, ProjectPatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            InternalError: "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            InternalError: "project repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Store a freshly created project together with its member set.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Append `member` unless already listed.
    ///
    /// Returns `false` when the project no longer exists.
    async fn add_member(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectRepositoryError>;

    /// Write only the fields present in `patch`.
    ///
    /// Returns `false` when the project no longer exists.
    async fn update_details(
        &self,
        project: &ProjectId,
        patch: &ProjectPatch,
    ) -> Result<bool, ProjectRepositoryError>;

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Projects that list `member`, oldest first.
    async fn list_for_member(
        &self,
        member: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Remove a project. Returns `false` when it did not exist.
    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError>;
}
