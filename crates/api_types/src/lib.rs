use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod convert;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Inr,
    Jpy,
}

impl Currency {
    /// ISO 4217 code, as sent on the wire.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Response body for any endpoint that creates a row.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: Uuid,
}

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        pub currency: Option<Currency>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        pub currency: Currency,
        pub members: Vec<super::member::MemberView>,
        pub expenses: Vec<super::expense::ExpenseView>,
        pub settlements: Vec<super::settlement::SettlementView>,
    }
}

pub mod member {
    use super::*;

    /// Request body for joining a group.
    ///
    /// `joined_at` defaults to the time of the request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberNew {
        pub name: String,
        pub room: Option<String>,
        pub joined_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberRename {
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: String,
        pub name: String,
        pub joined_at: DateTime<Utc>,
        #[serde(default)]
        pub room: Option<String>,
        #[serde(default)]
        pub left_at: Option<DateTime<Utc>>,
    }
}

pub mod expense {
    use super::*;

    /// Request body for a new expense. `amount` is in major units (e.g. `12.5`).
    ///
    /// Missing or empty `participants` means "split among everyone who had
    /// joined by `created_at`".
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub payer: String,
        pub amount: f64,
        #[serde(default)]
        pub participants: Vec<String>,
        pub created_at: Option<DateTime<Utc>>,
        pub category: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        #[serde(default)]
        pub id: Option<Uuid>,
        pub payer: String,
        pub amount: f64,
        #[serde(default)]
        pub participants: Vec<String>,
        pub created_at: DateTime<Utc>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
    }
}

pub mod settlement {
    use super::*;

    /// Request body for recording a transfer ("mark as paid").
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementNew {
        pub from: String,
        pub to: String,
        pub amount: f64,
        pub created_at: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SettlementView {
        #[serde(default)]
        pub id: Option<Uuid>,
        pub from: String,
        pub to: String,
        pub amount: f64,
        pub created_at: DateTime<Utc>,
    }
}

pub mod snapshot {
    use super::*;

    /// A full ledger submitted for a one-off computation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SnapshotView {
        #[serde(default)]
        pub currency: Currency,
        pub members: Vec<super::member::MemberView>,
        #[serde(default)]
        pub expenses: Vec<super::expense::ExpenseView>,
        #[serde(default)]
        pub settlements: Vec<super::settlement::SettlementView>,
    }
}

pub mod balance {
    use super::*;

    /// Display strings are rounded to the currency's minor digits; `*_minor`
    /// fields carry the same rounding as integers.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub member: String,
        pub name: String,
        pub paid: String,
        pub owed: String,
        pub net: String,
        pub net_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SuggestionView {
        pub from: String,
        pub to: String,
        pub amount: String,
        pub amount_minor: i64,
        /// Unrounded amount in major units; record this to settle exactly.
        pub amount_exact: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceReportView {
        pub currency: Currency,
        pub total_spent: String,
        pub settled: bool,
        pub balances: Vec<BalanceView>,
        pub plan: Vec<SuggestionView>,
    }
}
