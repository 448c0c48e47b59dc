//! Driven port for ticket persistence.

use async_trait::async_trait;

use crate::domain::{ProjectId, Ticket, TicketId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ticket repository adapters.
    pub enum TicketRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            InternalError: "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            InternalError: "ticket repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert or replace a ticket.
    async fn save(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError>;

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError>;

    /// Tickets referencing `project`, oldest first.
    async fn list_by_project(&self, project: &ProjectId)
    -> Result<Vec<Ticket>, TicketRepositoryError>;

    /// Remove a ticket. Returns `false` when it did not exist.
    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError>;
}
