//! Domain entities, authorization policy and use-case services.
//!
//! Nothing in this module knows about HTTP or SQL. Services reach storage and
//! credential hashing only through the traits in [`ports`].

pub mod auth;
pub mod comment;
pub mod error;
pub mod ids;
pub mod policy;
pub mod ports;
pub mod project;
pub mod stats;
pub mod ticket;
pub mod trace_id;
pub mod user;

mod account_service;
mod comment_service;
mod project_service;
mod stats_service;
mod ticket_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::AccountService;
pub use self::auth::{CredentialValidationError, LoginCredentials, PASSWORD_MIN_LEN, Registration};
pub use self::comment::{COMMENT_TEXT_MAX, Comment, CommentText, CommentValidationError};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{CommentId, InvalidIdError, ProjectId, TicketId, UserId};
pub use self::policy::ProjectAction;
pub use self::project::{
    PROJECT_DESCRIPTION_MAX, PROJECT_NAME_MAX, Project, ProjectDescription, ProjectDraft,
    ProjectName, ProjectPatch, ProjectValidationError,
};
pub use self::project_service::ProjectService;
pub use self::stats::{StatusCounts, WorkspaceStats};
pub use self::stats_service::WorkspaceStatsService;
pub use self::ticket::{
    TICKET_DESCRIPTION_MAX, TICKET_TITLE_MAX, Ticket, TicketDescription, TicketDraft,
    TicketFilter, TicketPatch, TicketPriority, TicketStatus, TicketTitle, TicketValidationError,
};
pub use self::ticket_service::TicketService;
pub use self::trace_id::TraceId;
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EmailAddress, PasswordDigest, User, UserProfile,
    UserValidationError,
};
