//! Domain values for persistence suites.
//!
//! Timestamps are whole seconds so they survive PostgreSQL's microsecond
//! precision unchanged.
#![allow(dead_code, reason = "each suite uses a subset of these builders")]

use chrono::{DateTime, Duration, TimeZone, Utc};

use bug_tracker::domain::{
    Comment, CommentId, CommentText, DisplayName, EmailAddress, PasswordDigest, Project,
    ProjectDescription, ProjectId, ProjectName, Ticket, TicketDescription, TicketDraft, TicketId,
    TicketPriority, TicketStatus, TicketTitle, User, UserId,
};

/// `2026-03-02T09:15:00Z` shifted by `offset_secs`.
pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 0)
        .single()
        .expect("valid base timestamp")
        + Duration::seconds(offset_secs)
}

pub fn user(name: &str) -> User {
    User::new(
        UserId::random(),
        DisplayName::new(name).expect("valid name"),
        EmailAddress::new(format!("{}@example.com", name.to_lowercase())).expect("valid email"),
        PasswordDigest::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        at(0),
    )
}

pub fn project(owner: &UserId, name: &str, created_offset: i64) -> Project {
    Project::create(
        ProjectId::random(),
        *owner,
        ProjectName::new(name).expect("valid name"),
        ProjectDescription::new(format!("{name} description")).expect("valid description"),
        at(created_offset),
    )
}

pub fn ticket(project: &ProjectId, creator: &UserId, title: &str, status: TicketStatus) -> Ticket {
    Ticket::from(TicketDraft {
        id: TicketId::random(),
        title: TicketTitle::new(title).expect("valid title"),
        description: TicketDescription::new("steps to reproduce").expect("valid description"),
        priority: TicketPriority::Medium,
        status,
        project: *project,
        assignee: None,
        created_by: *creator,
        created_at: at(0),
    })
}

pub fn comment(ticket: &TicketId, author: &UserId, text: &str, created_offset: i64) -> Comment {
    Comment {
        id: CommentId::random(),
        ticket: *ticket,
        author: *author,
        text: CommentText::new(text).expect("valid text"),
        created_at: at(created_offset),
    }
}
