//! Project aggregate: a named container owned by one user with a member set.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{ProjectId, UserId};

pub const PROJECT_NAME_MAX: usize = 120;
pub const PROJECT_DESCRIPTION_MAX: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("project name must not be empty")]
    EmptyName,
    #[error("project name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("project description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("project owner must be one of its members")]
    OwnerNotMember,
}

impl ProjectValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::DescriptionTooLong { .. } => "description",
            Self::OwnerNotMember => "members",
        }
    }
}

/// Trimmed, non-empty project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProjectValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if trimmed.chars().count() > PROJECT_NAME_MAX {
            return Err(ProjectValidationError::NameTooLong {
                max: PROJECT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form description; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    pub fn new(raw: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let raw = raw.into();
        if raw.chars().count() > PROJECT_DESCRIPTION_MAX {
            return Err(ProjectValidationError::DescriptionTooLong {
                max: PROJECT_DESCRIPTION_MAX,
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored representation used to rebuild a [`Project`].
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub id: ProjectId,
    pub name: ProjectName,
    pub description: ProjectDescription,
    pub owner: UserId,
    pub members: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// A project.
///
/// ## Invariants
/// - `owner` is always contained in `members`.
/// - `members` holds no duplicates and keeps insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: ProjectDescription,
    owner: UserId,
    members: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Start a project whose only member is its owner.
    pub fn create(
        id: ProjectId,
        owner: UserId,
        name: ProjectName,
        description: ProjectDescription,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            owner,
            members: vec![owner],
            created_at,
        }
    }

    /// Rebuild a stored project, de-duplicating members.
    pub fn restore(draft: ProjectDraft) -> Result<Self, ProjectValidationError> {
        let ProjectDraft {
            id,
            name,
            description,
            owner,
            members: raw_members,
            created_at,
        } = draft;
        let mut members = Vec::with_capacity(raw_members.len());
        for member in raw_members {
            if !members.contains(&member) {
                members.push(member);
            }
        }
        if !members.contains(&owner) {
            return Err(ProjectValidationError::OwnerNotMember);
        }
        Ok(Self {
            id,
            name,
            description,
            owner,
            members,
            created_at,
        })
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn description(&self) -> &ProjectDescription {
        &self.description
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Add `user` to the member set. Returns `false` when already present.
    pub fn add_member(&mut self, user: UserId) -> bool {
        if self.members.contains(&user) {
            return false;
        }
        self.members.push(user);
        true
    }

    /// Apply the present fields of `patch`.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Partial project update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<ProjectName>,
    pub description: Option<ProjectDescription>,
}

impl ProjectPatch {
    /// Build a patch from raw input, treating blank strings as absent.
    pub fn from_raw(
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, ProjectValidationError> {
        let name = name
            .filter(|value| !value.trim().is_empty())
            .map(ProjectName::new)
            .transpose()?;
        let description = description
            .filter(|value| !value.trim().is_empty())
            .map(ProjectDescription::new)
            .transpose()?;
        Ok(Self { name, description })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
