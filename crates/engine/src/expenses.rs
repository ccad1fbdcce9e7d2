//! Shared expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MemberId, Money};

/// A cost fronted by `payer` and shared by a split set.
///
/// An empty `participants` list means "everyone who had joined by
/// `created_at`" (see [`SplitPolicy`](crate::SplitPolicy)).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: Money,
    pub payer: MemberId,
    #[serde(default)]
    pub participants: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl Expense {
    pub fn new(payer: impl Into<MemberId>, amount: Money, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            payer: payer.into(),
            participants: Vec::new(),
            created_at,
            category: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_participants<I, M>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
