//! Driving port for ticket reads and the projections it returns.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, ProjectName, Ticket, TicketFilter, TicketId, UserProfile};

/// Ticket with referenced accounts resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketView {
    pub ticket: Ticket,
    pub assignee: Option<UserProfile>,
    pub created_by: Option<UserProfile>,
}

/// Name-only projection of a ticket's project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: ProjectName,
}

/// Single-ticket projection. `project` is `None` for orphaned tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetail {
    pub view: TicketView,
    pub project: Option<ProjectSummary>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketQuery: Send + Sync {
    /// Tickets of `project` matching `filter`, oldest first.
    async fn list_by_project(
        &self,
        project: &ProjectId,
        filter: &TicketFilter,
    ) -> Result<Vec<TicketView>, Error>;

    async fn get_by_id(&self, ticket: &TicketId) -> Result<TicketDetail, Error>;
}
