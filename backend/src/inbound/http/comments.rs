//! Comment endpoints.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CommentText, Error, TicketId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::CommentBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, comment_error, parse_id, require_text};

const TICKET_ID: FieldName = FieldName::new("ticketId");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AddCommentBody {
    #[schema(example = "Reproduced on staging")]
    pub text: Option<String>,
    pub ticket_id: Option<String>,
}

/// Post a comment on any existing ticket.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = AddCommentBody,
    responses(
        (status = 201, description = "Comment added", body = CommentBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Ticket not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "addComment"
)]
#[post("/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddCommentBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let AddCommentBody { text, ticket_id } = payload.into_inner();
    let ticket: TicketId = parse_id(&require_text(ticket_id, TICKET_ID)?, TICKET_ID)?;
    let text = CommentText::new(require_text(text, FieldName::new("text"))?)
        .map_err(|err| comment_error(&err))?;
    let view = state.comments.add(&caller, &ticket, text).await?;
    Ok(HttpResponse::Created().json(CommentBody::from(view)))
}

/// A ticket's thread, oldest first. Unknown tickets have an empty thread.
#[utoipa::path(
    get,
    path = "/api/v1/comments/{ticketId}",
    params(("ticketId" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Comments", body = [CommentBody]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/comments/{ticketId}")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentBody>>> {
    session.require_user_id()?;
    let ticket: TicketId = parse_id(&path.into_inner(), TICKET_ID)?;
    let comments = state.comments_query.list_by_ticket(&ticket).await?;
    Ok(web::Json(comments.into_iter().map(CommentBody::from).collect()))
}
