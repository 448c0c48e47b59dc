//! Driving port for posting comments.

use async_trait::async_trait;

use crate::domain::{CommentText, Error, TicketId, UserId};

use super::CommentView;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Attach a comment to an existing ticket.
    async fn add(
        &self,
        caller: &UserId,
        ticket: &TicketId,
        text: CommentText,
    ) -> Result<CommentView, Error>;
}
