//! Project endpoints.
//!
//! ```text
//! POST /api/v1/projects             {"name":"Alpha","description":"First"}
//! POST /api/v1/projects/add-member  {"projectId":"…","memberId":"…"}
//! GET  /api/v1/projects/stats
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateProjectRequest;
use crate::domain::{Error, ProjectDescription, ProjectId, ProjectName, ProjectPatch, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{ProjectBody, StatsBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, project_error, require_text};

const PROJECT_ID: FieldName = FieldName::new("projectId");
const MEMBER_ID: FieldName = FieldName::new("memberId");

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProjectBody {
    #[schema(example = "Alpha")]
    pub name: Option<String>,
    #[schema(example = "First project")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AddMemberBody {
    pub project_id: Option<String>,
    pub member_id: Option<String>,
}

/// Partial update; blank or absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Projects the caller belongs to, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Member projects", body = [ProjectBody]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectBody>>> {
    let caller = session.require_user_id()?;
    let projects = state.projects_query.list(&caller).await?;
    Ok(web::Json(projects.into_iter().map(ProjectBody::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectBody,
    responses(
        (status = 201, description = "Project created", body = ProjectBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProjectBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let CreateProjectBody { name, description } = payload.into_inner();
    let name = require_text(name, FieldName::new("name"))?;
    let request = CreateProjectRequest {
        name: ProjectName::new(name).map_err(|err| project_error(&err))?,
        description: ProjectDescription::new(description.unwrap_or_default())
            .map_err(|err| project_error(&err))?,
    };
    let view = state.projects.create(&caller, request).await?;
    Ok(HttpResponse::Created().json(ProjectBody::from(view)))
}

/// Counters across the caller's projects.
#[utoipa::path(
    get,
    path = "/api/v1/projects/stats",
    responses(
        (status = 200, description = "Workspace statistics", body = StatsBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "projectStats"
)]
#[get("/projects/stats")]
pub async fn project_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatsBody>> {
    let caller = session.require_user_id()?;
    let stats = state.stats.compute_stats(&caller).await?;
    Ok(web::Json(stats.into()))
}

/// Owner-only. Adding an existing member changes nothing.
#[utoipa::path(
    post,
    path = "/api/v1/projects/add-member",
    request_body = AddMemberBody,
    responses(
        (status = 200, description = "Updated project", body = ProjectBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not the owner", body = Error),
        (status = 404, description = "Project or account not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "addProjectMember"
)]
#[post("/projects/add-member")]
pub async fn add_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddMemberBody>,
) -> ApiResult<web::Json<ProjectBody>> {
    let caller = session.require_user_id()?;
    let AddMemberBody {
        project_id,
        member_id,
    } = payload.into_inner();
    let project: ProjectId = parse_id(&require_text(project_id, PROJECT_ID)?, PROJECT_ID)?;
    let member: UserId = parse_id(&require_text(member_id, MEMBER_ID)?, MEMBER_ID)?;
    let view = state.projects.add_member(&caller, &project, &member).await?;
    Ok(web::Json(view.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateProjectBody,
    responses(
        (status = 200, description = "Updated project", body = ProjectBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not a member", body = Error),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateProjectBody>,
) -> ApiResult<web::Json<ProjectBody>> {
    let caller = session.require_user_id()?;
    let project: ProjectId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let patch = ProjectPatch::from_raw(payload.name.as_deref(), payload.description.as_deref())
        .map_err(|err| project_error(&err))?;
    let view = state.projects.update(&caller, &project, patch).await?;
    Ok(web::Json(view.into()))
}

/// Owner-only. The project's tickets are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller is not the owner", body = Error),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let project: ProjectId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    state.projects.delete(&caller, &project).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
