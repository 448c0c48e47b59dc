//! Driving port for ticket mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, ProjectId, TicketDescription, TicketId, TicketPatch, TicketPriority, TicketTitle,
    UserId,
};

use super::TicketView;

/// Validated ticket creation payload. Status always starts at `todo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTicketRequest {
    pub title: TicketTitle,
    pub description: TicketDescription,
    pub priority: TicketPriority,
    pub project: ProjectId,
    pub assignee: Option<UserId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketCommand: Send + Sync {
    /// Create a ticket. The caller must belong to the target project.
    async fn create(
        &self,
        caller: &UserId,
        request: CreateTicketRequest,
    ) -> Result<TicketView, Error>;

    /// Merge `patch` onto the ticket after the policy allows the change.
    async fn update(
        &self,
        caller: &UserId,
        ticket: &TicketId,
        patch: TicketPatch,
    ) -> Result<TicketView, Error>;

    async fn delete(&self, caller: &UserId, ticket: &TicketId) -> Result<(), Error>;
}
