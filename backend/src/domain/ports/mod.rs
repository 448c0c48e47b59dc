//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are implemented by
//! domain services and called by inbound adapters. Driven ports
//! (`*Repository`, [`PasswordHasher`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod comment_command;
mod comment_query;
mod comment_repository;
mod login_service;
mod password_hasher;
mod project_command;
mod project_query;
mod project_repository;
mod ticket_command;
mod ticket_query;
mod ticket_repository;
mod user_repository;
mod users_query;
mod workspace_stats_query;
mod workspace_stats_repository;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use comment_command::CommentCommand;
#[cfg(test)]
pub use comment_command::MockCommentCommand;
#[cfg(test)]
pub use comment_query::MockCommentQuery;
pub use comment_query::{CommentQuery, CommentView};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{INVALID_CREDENTIALS, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use project_command::MockProjectCommand;
pub use project_command::{CreateProjectRequest, ProjectCommand};
#[cfg(test)]
pub use project_query::MockProjectQuery;
pub use project_query::{ProjectQuery, ProjectView};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use ticket_command::MockTicketCommand;
pub use ticket_command::{CreateTicketRequest, TicketCommand};
#[cfg(test)]
pub use ticket_query::MockTicketQuery;
pub use ticket_query::{ProjectSummary, TicketDetail, TicketQuery, TicketView};
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::{TicketRepository, TicketRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
#[cfg(test)]
pub use workspace_stats_query::MockWorkspaceStatsQuery;
pub use workspace_stats_query::WorkspaceStatsQuery;
#[cfg(test)]
pub use workspace_stats_repository::MockWorkspaceStatsRepository;
pub use workspace_stats_repository::{WorkspaceStatsRepository, WorkspaceStatsRepositoryError};
