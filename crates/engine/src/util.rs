//! Internal helpers for ledger validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every entry point rejects a bad snapshot the same way and
//! before any balance is touched.

use std::collections::HashMap;

use crate::{EngineError, Expense, Member, MemberId, ResultEngine, Settlement};

/// Position of each member in the roster.
pub(crate) type RosterIndex<'a> = HashMap<&'a MemberId, usize>;

/// Index the roster by id, rejecting empty rosters and duplicate ids.
pub(crate) fn roster_index(members: &[Member]) -> ResultEngine<RosterIndex<'_>> {
    if members.is_empty() {
        return Err(EngineError::EmptyRoster);
    }
    let mut index = HashMap::with_capacity(members.len());
    for (position, member) in members.iter().enumerate() {
        if index.insert(&member.id, position).is_some() {
            return Err(EngineError::DuplicateMember(member.id.to_string()));
        }
    }
    Ok(index)
}

/// Resolve a member id to its roster position.
pub(crate) fn resolve(index: &RosterIndex<'_>, id: &MemberId, role: &str) -> ResultEngine<usize> {
    index
        .get(id)
        .copied()
        .ok_or_else(|| EngineError::Referential(format!("{role} '{id}' is not in the roster")))
}

pub(crate) fn validate_expense(index: &RosterIndex<'_>, expense: &Expense) -> ResultEngine<()> {
    if expense.amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "expense {} has a negative amount",
            expense.id
        )));
    }
    resolve(index, &expense.payer, "payer")?;
    for participant in &expense.participants {
        resolve(index, participant, "participant")?;
    }
    Ok(())
}

pub(crate) fn validate_settlement(
    index: &RosterIndex<'_>,
    settlement: &Settlement,
) -> ResultEngine<()> {
    if !settlement.amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "settlement {} must have a positive amount",
            settlement.id
        )));
    }
    resolve(index, &settlement.from, "settlement sender")?;
    resolve(index, &settlement.to, "settlement recipient")?;
    Ok(())
}

/// Validate every ledger row against the roster.
pub(crate) fn validate_ledger(
    index: &RosterIndex<'_>,
    expenses: &[Expense],
    settlements: &[Settlement],
) -> ResultEngine<()> {
    for expense in expenses {
        validate_expense(index, expense)?;
    }
    for settlement in settlements {
        validate_settlement(index, settlement)?;
    }
    Ok(())
}

pub(crate) fn overflow() -> EngineError {
    EngineError::InvalidAmount("ledger total overflows".to_string())
}
