//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, CommentText, TicketId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    map_basic_pool_error(error, CommentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment(row: CommentRow) -> Result<Comment, CommentRepositoryError> {
    let text = CommentText::new(&row.body).map_err(|err| {
        warn!(comment_id = %row.id, error = %err, "stored comment failed validation");
        CommentRepositoryError::query("stored comment is invalid")
    })?;
    Ok(Comment {
        id: CommentId::from_uuid(row.id),
        ticket: TicketId::from_uuid(row.ticket_id),
        author: UserId::from_uuid(row.author_id),
        text,
        created_at: row.created_at,
    })
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            id: *comment.id.as_uuid(),
            ticket_id: *comment.ticket.as_uuid(),
            author_id: *comment.author.as_uuid(),
            body: comment.text.as_str(),
            created_at: comment.created_at,
        };
        diesel::insert_into(comments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_by_ticket(
        &self,
        ticket: &TicketId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::ticket_id.eq(ticket.as_uuid()))
            .order((comments::created_at.asc(), comments::seq.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_comment).collect()
    }
}
