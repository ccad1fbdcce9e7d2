//! Group members.
//!
//! A member is never deleted: leaving a group sets `left_at` so historical
//! expenses and settlements keep resolving the id.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque member identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MemberId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub joined_at: DateTime<Utc>,
    /// Room (or sub-group) the member belongs to, if any.
    pub room: Option<String>,
    /// Set when the member was unlinked from the group.
    pub left_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            joined_at,
            room: None,
            left_at: None,
        }
    }

    #[must_use]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    #[must_use]
    pub fn with_left_at(mut self, left_at: DateTime<Utc>) -> Self {
        self.left_at = Some(left_at);
        self
    }

    /// Returns `true` if the member was still linked to the group at `at`.
    #[must_use]
    pub fn is_linked_at(&self, at: DateTime<Utc>) -> bool {
        self.left_at.is_none_or(|left| left > at)
    }
}
