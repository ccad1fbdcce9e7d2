use serde::{Deserialize, Serialize};

use crate::{
    Currency, Expense, Member, Money, ResultEngine, Settlement,
    util::{overflow, roster_index, validate_expense, validate_ledger, validate_settlement},
};

/// A consistent point-in-time copy of one group's ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub currency: Currency,
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl Snapshot {
    /// Checks roster and ledger invariants without computing anything.
    pub fn validate(&self) -> ResultEngine<()> {
        let index = roster_index(&self.members)?;
        validate_ledger(&index, &self.expenses, &self.settlements)
    }

    /// Appends an expense after checking it against the roster.
    ///
    /// On error the snapshot is left untouched.
    pub fn push_expense(&mut self, expense: Expense) -> ResultEngine<()> {
        validate_expense(&roster_index(&self.members)?, &expense)?;
        self.expenses.push(expense);
        Ok(())
    }

    /// Appends a settlement after checking it against the roster.
    ///
    /// On error the snapshot is left untouched.
    pub fn push_settlement(&mut self, settlement: Settlement) -> ResultEngine<()> {
        validate_settlement(&roster_index(&self.members)?, &settlement)?;
        self.settlements.push(settlement);
        Ok(())
    }

    /// Sum of all expense amounts.
    pub fn total_spent(&self) -> ResultEngine<Money> {
        self.expenses.iter().try_fold(Money::ZERO, |acc, e| {
            acc.checked_add(e.amount).ok_or_else(overflow)
        })
    }
}
