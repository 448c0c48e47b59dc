//! Ticket endpoints.
//!
//! ```text
//! POST /api/v1/tickets                {"title":"Crash","projectId":"…","priority":"high"}
//! GET  /api/v1/tickets/{projectId}?search=crash&status=todo
//! PUT  /api/v1/tickets/{id}           {"status":"done","assignee":null}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CreateTicketRequest;
use crate::domain::{
    Error, ProjectId, TicketDescription, TicketFilter, TicketId, TicketPatch, TicketPriority,
    TicketStatus, TicketTitle, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{TicketBody, TicketDetailBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_id, require_text, ticket_error,
};

const PROJECT_ID: FieldName = FieldName::new("projectId");
const ASSIGNEE: FieldName = FieldName::new("assignee");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTicketBody {
    #[schema(example = "Crash when saving")]
    pub title: Option<String>,
    pub description: Option<String>,
    /// `low`, `medium` or `high`; defaults to `medium`.
    #[schema(example = "high")]
    pub priority: Option<String>,
    pub project_id: Option<String>,
    /// Account id of the assignee.
    pub assignee: Option<String>,
}

/// Fields a caller may change. Unknown fields are rejected.
///
/// `assignee: null` clears the assignee; omitting it keeps the current one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTicketBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    #[schema(example = "in-progress")]
    pub status: Option<String>,
    #[serde(deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub assignee: Option<Option<String>>,
    /// Target project when moving the ticket.
    #[serde(alias = "projectId")]
    pub project: Option<String>,
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct TicketListQuery {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|raw| !raw.is_empty())
}

fn parse_priority(value: Option<&str>) -> Result<Option<TicketPriority>, Error> {
    non_blank(value)
        .map(str::parse::<TicketPriority>)
        .transpose()
        .map_err(|err| ticket_error(&err))
}

fn parse_status(value: Option<&str>) -> Result<Option<TicketStatus>, Error> {
    non_blank(value)
        .map(str::parse::<TicketStatus>)
        .transpose()
        .map_err(|err| ticket_error(&err))
}

impl TicketListQuery {
    fn into_filter(self) -> Result<TicketFilter, Error> {
        Ok(TicketFilter {
            priority: parse_priority(self.priority.as_deref())?,
            status: parse_status(self.status.as_deref())?,
            search: self.search.filter(|needle| !needle.trim().is_empty()),
        })
    }
}

impl CreateTicketBody {
    fn into_request(self) -> Result<CreateTicketRequest, Error> {
        let title = require_text(self.title, FieldName::new("title"))?;
        let project_id = require_text(self.project_id, PROJECT_ID)?;
        Ok(CreateTicketRequest {
            title: TicketTitle::new(title).map_err(|err| ticket_error(&err))?,
            description: TicketDescription::new(self.description.unwrap_or_default())
                .map_err(|err| ticket_error(&err))?,
            priority: parse_priority(self.priority.as_deref())?.unwrap_or_default(),
            project: parse_id(&project_id, PROJECT_ID)?,
            assignee: parse_optional_id(self.assignee.as_deref(), ASSIGNEE)?,
        })
    }
}

impl UpdateTicketBody {
    fn into_patch(self) -> Result<TicketPatch, Error> {
        let title = self
            .title
            .map(TicketTitle::new)
            .transpose()
            .map_err(|err| ticket_error(&err))?;
        let description = self
            .description
            .map(TicketDescription::new)
            .transpose()
            .map_err(|err| ticket_error(&err))?;
        let assignee = self
            .assignee
            .map(|assignee| parse_optional_id::<UserId>(assignee.as_deref(), ASSIGNEE))
            .transpose()?;
        let project = self
            .project
            .map(|raw| parse_id::<ProjectId>(&raw, FieldName::new("project")))
            .transpose()?;
        Ok(TicketPatch {
            title,
            description,
            priority: parse_priority(self.priority.as_deref())?,
            status: parse_status(self.status.as_deref())?,
            assignee,
            project,
        })
    }
}

/// Open a ticket in a project the caller belongs to. Status starts at `todo`.
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = CreateTicketBody,
    responses(
        (status = 201, description = "Ticket created", body = TicketBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not a project member", body = Error),
        (status = 404, description = "Project or assignee not found", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTicketBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let request = payload.into_inner().into_request()?;
    let view = state.tickets.create(&caller, request).await?;
    Ok(HttpResponse::Created().json(TicketBody::from(view)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tickets/{projectId}",
    params(
        ("projectId" = String, Path, description = "Project id"),
        TicketListQuery
    ),
    responses(
        (status = 200, description = "Project tickets, oldest first", body = [TicketBody]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets/{projectId}")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<TicketListQuery>,
) -> ApiResult<web::Json<Vec<TicketBody>>> {
    session.require_user_id()?;
    let project: ProjectId = parse_id(&path.into_inner(), PROJECT_ID)?;
    let filter = query.into_inner().into_filter()?;
    let tickets = state.tickets_query.list_by_project(&project, &filter).await?;
    Ok(web::Json(tickets.into_iter().map(TicketBody::from).collect()))
}

/// One ticket with its project name; `project` is `null` once orphaned.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/detail/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Ticket", body = TicketDetailBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Ticket not found", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "getTicket"
)]
#[get("/tickets/detail/{id}")]
pub async fn ticket_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TicketDetailBody>> {
    session.require_user_id()?;
    let ticket: TicketId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let detail = state.tickets_query.get_by_id(&ticket).await?;
    Ok(web::Json(detail.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    request_body = UpdateTicketBody,
    responses(
        (status = 200, description = "Updated ticket", body = TicketBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller may not change this ticket", body = Error),
        (status = 404, description = "Ticket, project or assignee not found", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "updateTicket"
)]
#[put("/tickets/{id}")]
pub async fn update_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateTicketBody>,
) -> ApiResult<web::Json<TicketBody>> {
    let caller = session.require_user_id()?;
    let ticket: TicketId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let patch = payload.into_inner().into_patch()?;
    let view = state.tickets.update(&caller, &ticket, patch).await?;
    Ok(web::Json(view.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller may not delete this ticket", body = Error),
        (status = 404, description = "Ticket not found", body = Error)
    ),
    tags = ["tickets"],
    operation_id = "deleteTicket"
)]
#[delete("/tickets/{id}")]
pub async fn delete_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let ticket: TicketId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    state.tickets.delete(&caller, &ticket).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
