//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::inbound::http::comments::AddCommentBody;
use crate::inbound::http::dto::{
    CommentBody, ProjectBody, ProjectSummaryBody, StatsBody, TicketBody, TicketDetailBody,
    UserBody,
};
use crate::inbound::http::projects::{AddMemberBody, CreateProjectBody, UpdateProjectBody};
use crate::inbound::http::tickets::{CreateTicketBody, UpdateTicketBody};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/register or /api/v1/auth/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bug tracker API",
        description = "Projects, tickets and comments behind cookie sessions."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::me,
        crate::inbound::http::accounts::list_users,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::project_stats,
        crate::inbound::http::projects::add_member,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::ticket_detail,
        crate::inbound::http::tickets::update_ticket,
        crate::inbound::http::tickets::delete_ticket,
        crate::inbound::http::comments::add_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserBody,
        ProjectBody,
        ProjectSummaryBody,
        TicketBody,
        TicketDetailBody,
        CommentBody,
        StatsBody,
        RegisterRequest,
        LoginRequest,
        UpdateProfileRequest,
        CreateProjectBody,
        AddMemberBody,
        UpdateProjectBody,
        CreateTicketBody,
        UpdateTicketBody,
        AddCommentBody,
    )),
    tags(
        (name = "auth", description = "Accounts and sessions"),
        (name = "projects", description = "Projects, membership and statistics"),
        (name = "tickets", description = "Tickets within projects"),
        (name = "comments", description = "Ticket comment threads"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
