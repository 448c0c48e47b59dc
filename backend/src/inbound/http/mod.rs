//! HTTP inbound adapter exposing the REST API.

pub mod accounts;
pub mod comments;
pub mod dto;
pub mod error;
pub mod health;
pub mod projects;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on the enclosing scope.
///
/// Literal segments such as `/projects/stats` are registered ahead of the
/// `{id}` routes sharing their prefix.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::register)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::me)
        .service(accounts::list_users)
        .service(accounts::update_profile)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::project_stats)
        .service(projects::add_member)
        .service(projects::update_project)
        .service(projects::delete_project)
        .service(tickets::create_ticket)
        .service(tickets::ticket_detail)
        .service(tickets::list_tickets)
        .service(tickets::update_ticket)
        .service(tickets::delete_ticket)
        .service(comments::add_comment)
        .service(comments::list_comments);
}
