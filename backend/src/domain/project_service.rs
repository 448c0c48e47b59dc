//! Project use cases.
//!
//! Each mutation loads the project, asks [`policy`](crate::domain::policy)
//! whether the caller may proceed, issues a targeted write and answers with
//! the stored state.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::policy::{self, ProjectAction};
use crate::domain::ports::{
    CreateProjectRequest, ProjectCommand, ProjectQuery, ProjectRepository, ProjectView,
    UserRepository,
};
use crate::domain::{Error, Project, ProjectId, ProjectPatch, User, UserId};

#[derive(Clone)]
pub struct ProjectService<P, U> {
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> ProjectService<P, U> {
    pub fn new(projects: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            users,
            clock,
        }
    }
}

impl<P, U> ProjectService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    async fn load(&self, id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {id} not found")))
    }

    /// Re-read after a write so the view reflects concurrent changes too.
    async fn reload(&self, id: &ProjectId) -> Result<ProjectView, Error> {
        let project = self.load(id).await?;
        self.view(project).await
    }

    async fn view(&self, project: Project) -> Result<ProjectView, Error> {
        let owner = self
            .users
            .find_by_id(project.owner())
            .await?
            .map(|user| user.profile());
        Ok(ProjectView { project, owner })
    }
}

#[async_trait]
impl<P, U> ProjectCommand for ProjectService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        caller: &UserId,
        request: CreateProjectRequest,
    ) -> Result<ProjectView, Error> {
        let project = Project::create(
            ProjectId::random(),
            *caller,
            request.name,
            request.description,
            self.clock.utc(),
        );
        self.projects.insert(&project).await?;
        info!(project_id = %project.id(), owner_id = %caller, "project created");
        self.view(project).await
    }

    async fn add_member(
        &self,
        caller: &UserId,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<ProjectView, Error> {
        let id = project;
        let project = self.load(id).await?;
        policy::ensure_owner(&project, caller, ProjectAction::AddMember)?;
        if self.users.find_by_id(member).await?.is_none() {
            return Err(Error::not_found(format!("user {member} not found")));
        }
        if project.members().contains(member) {
            return self.view(project).await;
        }
        if !self.projects.add_member(id, member).await? {
            return Err(Error::not_found(format!("project {id} not found")));
        }
        info!(project_id = %id, member_id = %member, "member added");
        self.reload(id).await
    }

    async fn update(
        &self,
        caller: &UserId,
        project: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<ProjectView, Error> {
        let id = project;
        let project = self.load(id).await?;
        policy::ensure_member(&project, caller, ProjectAction::UpdateProject)?;
        if patch.is_empty() {
            return self.view(project).await;
        }
        if !self.projects.update_details(id, &patch).await? {
            return Err(Error::not_found(format!("project {id} not found")));
        }
        info!(project_id = %id, "project updated");
        self.reload(id).await
    }

    async fn delete(&self, caller: &UserId, project: &ProjectId) -> Result<(), Error> {
        let existing = self.load(project).await?;
        policy::ensure_owner(&existing, caller, ProjectAction::DeleteProject)?;
        if !self.projects.delete(project).await? {
            return Err(Error::not_found(format!("project {project} not found")));
        }
        info!(project_id = %project, "project deleted; tickets left orphaned");
        Ok(())
    }
}

#[async_trait]
impl<P, U> ProjectQuery for ProjectService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    async fn list(&self, caller: &UserId) -> Result<Vec<ProjectView>, Error> {
        let projects = self.projects.list_for_member(caller).await?;
        let mut owner_ids: Vec<UserId> = projects.iter().map(|p| *p.owner()).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners = self.users.find_many(&owner_ids).await?;
        Ok(projects
            .into_iter()
            .map(|project| {
                let owner = owners
                    .iter()
                    .find(|user| user.id() == project.owner())
                    .map(User::profile);
                ProjectView { project, owner }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
