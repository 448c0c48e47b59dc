//! Driving port for reading a ticket's comment thread.

use async_trait::async_trait;

use crate::domain::{Comment, Error, TicketId, UserProfile};

/// Comment with its author resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Option<UserProfile>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// Thread for `ticket` in creation order. Unknown tickets yield an empty list.
    async fn list_by_ticket(&self, ticket: &TicketId) -> Result<Vec<CommentView>, Error>;
}
