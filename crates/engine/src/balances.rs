//! Per-member balances computed from a ledger snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Expense, Member, MemberId, Money, ResultEngine, Settlement,
    util::{RosterIndex, overflow, resolve, roster_index, validate_ledger},
};

/// Net position of one member.
///
/// `net > 0`: the group owes the member. `net < 0`: the member owes the group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub member: MemberId,
    pub paid: Money,
    pub owed: Money,
    pub net: Money,
}

/// Rules for building the default split set of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Members who joined up to this long after an expense still share it.
    pub join_grace: Duration,
}

impl SplitPolicy {
    pub const DEFAULT_JOIN_GRACE_SECS: i64 = 60;

    pub fn new(join_grace: Duration) -> ResultEngine<Self> {
        if join_grace < Duration::zero() {
            return Err(EngineError::InvalidPolicy(
                "join grace must not be negative".to_string(),
            ));
        }
        Ok(Self { join_grace })
    }

    /// Members sharing `expense`, in split order.
    ///
    /// The explicit participant list wins when non-empty (duplicates are
    /// dropped). Otherwise every linked member who joined by the expense time
    /// (plus grace) is included, and the payer always is.
    #[must_use]
    pub fn split_set<'a>(&self, expense: &'a Expense, members: &'a [Member]) -> Vec<&'a MemberId> {
        if !expense.participants.is_empty() {
            let mut split: Vec<&MemberId> = Vec::with_capacity(expense.participants.len());
            for participant in &expense.participants {
                if !split.contains(&participant) {
                    split.push(participant);
                }
            }
            return split;
        }

        let cutoff = self.cutoff(expense.created_at);
        let mut split: Vec<&MemberId> = members
            .iter()
            .filter(|m| m.joined_at <= cutoff && m.is_linked_at(expense.created_at))
            .map(|m| &m.id)
            .collect();
        if !split.contains(&&expense.payer) {
            split.push(&expense.payer);
        }
        split
    }

    /// Computes one balance per member, in roster order.
    ///
    /// The whole snapshot is validated first; on error nothing is computed.
    pub fn compute_balances(
        &self,
        members: &[Member],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> ResultEngine<Vec<Balance>> {
        let index = roster_index(members)?;
        validate_ledger(&index, expenses, settlements)?;

        let mut paid = vec![Money::ZERO; members.len()];
        let mut owed = vec![Money::ZERO; members.len()];

        for expense in expenses {
            let payer = resolve(&index, &expense.payer, "payer")?;
            credit(&mut paid[payer], expense.amount)?;

            let split = self.split_indices(&index, expense, members)?;
            let (share, leftover) = expense.amount.split(split.len());
            for (position, member) in split.into_iter().enumerate() {
                let extra = if (position as i64) < leftover {
                    Money::from_ticks(1)
                } else {
                    Money::ZERO
                };
                credit(&mut owed[member], share + extra)?;
            }
        }

        for settlement in settlements {
            let from = resolve(&index, &settlement.from, "settlement sender")?;
            let to = resolve(&index, &settlement.to, "settlement recipient")?;
            debit(&mut owed[from], settlement.amount)?;
            debit(&mut paid[to], settlement.amount)?;
        }

        members
            .iter()
            .zip(paid.into_iter().zip(owed))
            .map(|(member, (paid, owed))| -> ResultEngine<Balance> {
                Ok(Balance {
                    member: member.id.clone(),
                    paid,
                    owed,
                    net: paid.checked_sub(owed).ok_or_else(overflow)?,
                })
            })
            .collect()
    }

    fn cutoff(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        at.checked_add_signed(self.join_grace)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn split_indices(
        &self,
        index: &RosterIndex<'_>,
        expense: &Expense,
        members: &[Member],
    ) -> ResultEngine<Vec<usize>> {
        self.split_set(expense, members)
            .into_iter()
            .map(|id| resolve(index, id, "participant"))
            .collect()
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            join_grace: Duration::seconds(Self::DEFAULT_JOIN_GRACE_SECS),
        }
    }
}

fn credit(slot: &mut Money, amount: Money) -> ResultEngine<()> {
    *slot = slot.checked_add(amount).ok_or_else(overflow)?;
    Ok(())
}

fn debit(slot: &mut Money, amount: Money) -> ResultEngine<()> {
    *slot = slot.checked_sub(amount).ok_or_else(overflow)?;
    Ok(())
}

/// Computes balances with the default [`SplitPolicy`].
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> ResultEngine<Vec<Balance>> {
    SplitPolicy::default().compute_balances(members, expenses, settlements)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ids(split: Vec<&MemberId>) -> Vec<&str> {
        split.into_iter().map(MemberId::as_str).collect()
    }

    #[test]
    fn grace_window_includes_members_joining_right_after() {
        let members = vec![
            Member::new("a", "A", at(0)),
            Member::new("b", "B", at(130)),
            Member::new("c", "C", at(200)),
        ];
        let expense = Expense::new("a", Money::ZERO, at(100));

        assert_eq!(ids(SplitPolicy::default().split_set(&expense, &members)), ["a", "b"]);

        let strict = SplitPolicy::new(Duration::zero()).unwrap();
        assert_eq!(ids(strict.split_set(&expense, &members)), ["a"]);
    }

    #[test]
    fn payer_is_always_in_default_split() {
        let members = vec![Member::new("a", "A", at(0)), Member::new("late", "L", at(10_000))];
        let expense = Expense::new("late", Money::ZERO, at(100));
        assert_eq!(ids(SplitPolicy::default().split_set(&expense, &members)), ["a", "late"]);
    }

    #[test]
    fn unlinked_members_are_left_out_of_default_split() {
        let members = vec![
            Member::new("a", "A", at(0)),
            Member::new("b", "B", at(0)).with_left_at(at(50)),
        ];
        let before = Expense::new("a", Money::ZERO, at(10));
        let after = Expense::new("a", Money::ZERO, at(60));
        let policy = SplitPolicy::default();
        assert_eq!(ids(policy.split_set(&before, &members)), ["a", "b"]);
        assert_eq!(ids(policy.split_set(&after, &members)), ["a"]);
    }

    #[test]
    fn explicit_participants_are_deduplicated() {
        let members = vec![Member::new("a", "A", at(0)), Member::new("b", "B", at(0))];
        let expense = Expense::new("a", Money::ZERO, at(0)).with_participants(["b", "b", "a"]);
        assert_eq!(ids(SplitPolicy::default().split_set(&expense, &members)), ["b", "a"]);
    }

    #[test]
    fn negative_grace_is_rejected() {
        assert!(matches!(
            SplitPolicy::new(Duration::seconds(-1)),
            Err(EngineError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn leftover_ticks_keep_ledger_zero_sum() {
        let members: Vec<Member> = (0..17)
            .map(|i| Member::new(format!("m{i}"), format!("M{i}"), at(0)))
            .collect();
        let expense = Expense::new("m0", Money::from_minor(1000).unwrap(), at(10));
        let balances = compute_balances(&members, &[expense], &[]).unwrap();
        let total: i64 = balances.iter().map(|b| b.net.ticks()).sum();
        assert_eq!(total, 0);
        let owed_total: i64 = balances.iter().map(|b| b.owed.ticks()).sum();
        assert_eq!(owed_total, Money::from_minor(1000).unwrap().ticks());
    }
}
