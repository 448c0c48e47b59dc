//! PostgreSQL-backed `TicketRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TicketRepository, TicketRepositoryError};
use crate::domain::{
    ProjectId, Ticket, TicketDescription, TicketDraft, TicketId, TicketTitle,
    TicketValidationError, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTicketRow, TicketRow, TicketUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tickets;

#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TicketRepositoryError {
    map_basic_pool_error(error, TicketRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TicketRepositoryError {
    map_basic_diesel_error(
        error,
        TicketRepositoryError::query,
        TicketRepositoryError::connection,
    )
}

fn row_to_ticket(row: TicketRow) -> Result<Ticket, TicketRepositoryError> {
    let invalid = |err: TicketValidationError| {
        warn!(ticket_id = %row.id, error = %err, "stored ticket failed validation");
        TicketRepositoryError::query("stored ticket is invalid")
    };
    let draft = TicketDraft {
        id: TicketId::from_uuid(row.id),
        title: TicketTitle::new(&row.title).map_err(invalid)?,
        description: TicketDescription::new(row.description.clone()).map_err(invalid)?,
        priority: row.priority.parse().map_err(invalid)?,
        status: row.status.parse().map_err(invalid)?,
        project: ProjectId::from_uuid(row.project_id),
        assignee: row.assignee_id.map(UserId::from_uuid),
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
    };
    Ok(Ticket::from(draft))
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn save(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewTicketRow {
            id: *ticket.id().as_uuid(),
            title: ticket.title().as_str(),
            description: ticket.description().as_str(),
            priority: ticket.priority().as_str(),
            status: ticket.status().as_str(),
            project_id: *ticket.project().as_uuid(),
            assignee_id: ticket.assignee().map(|id| *id.as_uuid()),
            created_by: *ticket.created_by().as_uuid(),
            created_at: ticket.created_at(),
        };
        let update_row = TicketUpdate {
            title: new_row.title,
            description: new_row.description,
            priority: new_row.priority,
            status: new_row.status,
            project_id: new_row.project_id,
            assignee_id: new_row.assignee_id,
        };

        diesel::insert_into(tickets::table)
            .values(&new_row)
            .on_conflict(tickets::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        tickets::table
            .find(id.as_uuid())
            .select(TicketRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_ticket)
            .transpose()
    }

    async fn list_by_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TicketRow> = tickets::table
            .filter(tickets::project_id.eq(project.as_uuid()))
            .order((tickets::created_at.asc(), tickets::seq.asc()))
            .select(TicketRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_ticket).collect()
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(tickets::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
