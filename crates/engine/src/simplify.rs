//! Greedy debt netting.
//!
//! Debtors are matched against creditors largest-first with a two-pointer
//! sweep. The result has at most `debtors + creditors - 1` transfers. It is a
//! heuristic: minimizing the transfer count exactly is NP-hard and not
//! attempted here.

use crate::{Balance, EngineError, MemberId, Money, ResultEngine, SettlementSuggestion};

/// Rules for turning balances into suggested transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementPolicy {
    /// Balances within `epsilon` of zero count as settled.
    pub epsilon: Money,
}

impl SettlementPolicy {
    pub fn new(epsilon: Money) -> ResultEngine<Self> {
        if epsilon.is_negative() {
            return Err(EngineError::InvalidPolicy(
                "settlement epsilon must not be negative".to_string(),
            ));
        }
        Ok(Self { epsilon })
    }

    /// Builds the settlement plan for `balances`.
    ///
    /// Members with equal balances keep their input order.
    #[must_use]
    pub fn simplify(&self, balances: &[Balance]) -> Vec<SettlementSuggestion> {
        let epsilon = self.epsilon;

        let mut debtors: Vec<(&MemberId, Money)> = balances
            .iter()
            .filter(|b| b.net < -epsilon)
            .map(|b| (&b.member, b.net))
            .collect();
        debtors.sort_by_key(|(_, net)| *net);

        let mut creditors: Vec<(&MemberId, Money)> = balances
            .iter()
            .filter(|b| b.net > epsilon)
            .map(|b| (&b.member, b.net))
            .collect();
        creditors.sort_by(|(_, a), (_, b)| b.cmp(a));

        let mut plan = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let (debtor, owes) = &mut debtors[i];
            let (creditor, owed) = &mut creditors[j];

            let amount = (-*owes).min(*owed);
            if amount > epsilon {
                plan.push(SettlementSuggestion {
                    from: (*debtor).clone(),
                    to: (*creditor).clone(),
                    amount,
                });
            }
            *owes += amount;
            *owed -= amount;

            if owes.abs() <= epsilon {
                i += 1;
            }
            if owed.abs() <= epsilon {
                j += 1;
            }
        }

        tracing::debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = plan.len(),
            "settlement plan built"
        );
        plan
    }
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            epsilon: Money::HALF_MINOR,
        }
    }
}

/// Builds a settlement plan with the default [`SettlementPolicy`].
#[must_use]
pub fn simplify_settlements(balances: &[Balance]) -> Vec<SettlementSuggestion> {
    SettlementPolicy::default().simplify(balances)
}
