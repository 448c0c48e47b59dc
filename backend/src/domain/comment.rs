//! Comments attached to tickets. Immutable once written.

use chrono::{DateTime, Utc};

use super::{CommentId, TicketId, UserId};

pub const COMMENT_TEXT_MAX: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("comment text must not be empty")]
    EmptyText,
    #[error("comment text must be at most {max} characters")]
    TextTooLong { max: usize },
}

/// Trimmed, non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CommentValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        if trimmed.chars().count() > COMMENT_TEXT_MAX {
            return Err(CommentValidationError::TextTooLong {
                max: COMMENT_TEXT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub ticket: TicketId,
    pub author: UserId,
    pub text: CommentText,
    pub created_at: DateTime<Utc>,
}
