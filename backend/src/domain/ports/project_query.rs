//! Driving port for project reads.

use async_trait::async_trait;

use crate::domain::{Error, Project, UserId, UserProfile};

/// Project with its owner resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub project: Project,
    pub owner: Option<UserProfile>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// Projects listing `caller` as a member, oldest first.
    async fn list(&self, caller: &UserId) -> Result<Vec<ProjectView>, Error>;
}
