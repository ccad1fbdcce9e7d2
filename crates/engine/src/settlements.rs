//! Recorded settlements and suggested transfers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MemberId, Money};

/// A real-world transfer that already happened.
///
/// Settlements are append-only: a mistake is corrected by recording the
/// reverse transfer, never by editing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: Uuid,
    pub amount: Money,
    pub from: MemberId,
    pub to: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(
        from: impl Into<MemberId>,
        to: impl Into<MemberId>,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            from: from.into(),
            to: to.into(),
            created_at,
        }
    }
}

/// A proposed transfer produced by
/// [`simplify_settlements`](crate::simplify_settlements). Purely advisory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSuggestion {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

impl SettlementSuggestion {
    /// Turns the suggestion into a settlement, as when a member marks it paid.
    #[must_use]
    pub fn into_settlement(self, created_at: DateTime<Utc>) -> Settlement {
        Settlement::new(self.from, self.to, self.amount, created_at)
    }
}
