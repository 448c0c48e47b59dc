//! Driven port for ticket comments.

use async_trait::async_trait;

use crate::domain::{Comment, TicketId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            InternalError: "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            InternalError: "comment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    /// Comments on `ticket` by ascending creation time, then insertion order.
    async fn list_by_ticket(
        &self,
        ticket: &TicketId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;
}
