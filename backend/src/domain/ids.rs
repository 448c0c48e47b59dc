//! Opaque entity identifiers.
//!
//! Every aggregate is keyed by a UUID newtype so that a ticket id can never be
//! passed where a project id is expected.

use std::fmt;

use uuid::Uuid;

/// Raised when identifier text is not a canonical UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct InvalidIdError {
    kind: &'static str,
}

impl InvalidIdError {
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse a textual identifier, rejecting padded or malformed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidIdError> {
                let raw = id.as_ref();
                if raw.trim() != raw {
                    return Err(InvalidIdError { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| InvalidIdError { kind: $kind })
            }

            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_entity_id!(
    /// Stable identity of a registered account.
    UserId => "user id"
);
define_entity_id!(
    /// Identity of a project.
    ProjectId => "project id"
);
define_entity_id!(
    /// Identity of a ticket.
    TicketId => "ticket id"
);
define_entity_id!(
    /// Identity of a comment.
    CommentId => "comment id"
);
