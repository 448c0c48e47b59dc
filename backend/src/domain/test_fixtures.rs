//! Shared builders for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    DisplayName, EmailAddress, PasswordDigest, Project, ProjectDescription, ProjectId,
    ProjectName, Ticket, TicketDescription, TicketDraft, TicketId, TicketPriority, TicketStatus,
    TicketTitle, User, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn user(name: &str) -> User {
    User::new(
        UserId::random(),
        DisplayName::new(name).expect("valid name"),
        EmailAddress::new(format!("{}@example.com", name.to_lowercase())).expect("valid email"),
        PasswordDigest::new("$argon2id$fixture"),
        fixture_timestamp(),
    )
}

pub(crate) fn project_owned_by(owner: &UserId, name: &str) -> Project {
    Project::create(
        ProjectId::random(),
        *owner,
        ProjectName::new(name).expect("valid name"),
        ProjectDescription::default(),
        fixture_timestamp(),
    )
}

pub(crate) fn ticket_in(project: &ProjectId, creator: &UserId, title: &str) -> Ticket {
    Ticket::from(TicketDraft {
        id: TicketId::random(),
        title: TicketTitle::new(title).expect("valid title"),
        description: TicketDescription::new("steps to reproduce").expect("valid description"),
        priority: TicketPriority::Medium,
        status: TicketStatus::Todo,
        project: *project,
        assignee: None,
        created_by: *creator,
        created_at: fixture_timestamp(),
    })
}
