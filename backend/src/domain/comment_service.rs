//! Comment thread use cases.
//!
//! Any authenticated caller may comment on an existing ticket; membership of
//! the ticket's project is not required.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CommentCommand, CommentQuery, CommentRepository, CommentView, TicketRepository,
    UserRepository,
};
use crate::domain::{Comment, CommentId, CommentText, Error, TicketId, User, UserId};

#[derive(Clone)]
pub struct CommentService<C, T, U> {
    comments: Arc<C>,
    tickets: Arc<T>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, T, U> CommentService<C, T, U> {
    pub fn new(comments: Arc<C>, tickets: Arc<T>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            tickets,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<C, T, U> CommentCommand for CommentService<C, T, U>
where
    C: CommentRepository,
    T: TicketRepository,
    U: UserRepository,
{
    async fn add(
        &self,
        caller: &UserId,
        ticket: &TicketId,
        text: CommentText,
    ) -> Result<CommentView, Error> {
        if self.tickets.find_by_id(ticket).await?.is_none() {
            return Err(Error::not_found(format!("ticket {ticket} not found")));
        }
        let comment = Comment {
            id: CommentId::random(),
            ticket: *ticket,
            author: *caller,
            text,
            created_at: self.clock.utc(),
        };
        self.comments.insert(&comment).await?;
        info!(comment_id = %comment.id, ticket_id = %ticket, "comment added");
        let author = self
            .users
            .find_by_id(caller)
            .await?
            .map(|user| user.profile());
        Ok(CommentView { comment, author })
    }
}

#[async_trait]
impl<C, T, U> CommentQuery for CommentService<C, T, U>
where
    C: CommentRepository,
    T: TicketRepository,
    U: UserRepository,
{
    async fn list_by_ticket(&self, ticket: &TicketId) -> Result<Vec<CommentView>, Error> {
        let comments = self.comments.list_by_ticket(ticket).await?;
        if comments.is_empty() {
            return Ok(Vec::new());
        }
        let mut author_ids: Vec<UserId> = comments.iter().map(|c| c.author).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.users.find_many(&author_ids).await?;
        Ok(comments
            .into_iter()
            .map(|comment| {
                let author = authors
                    .iter()
                    .find(|user| *user.id() == comment.author)
                    .map(User::profile);
                CommentView { comment, author }
            })
            .collect())
    }
}
