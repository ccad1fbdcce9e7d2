use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{
    Balance, Currency, EngineError, MemberId, Money, ResultEngine, SettlementPolicy, SettlementSuggestion,
    Snapshot, SplitPolicy,
};

/// Everything a group screen needs: balances, the plan and totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub currency: Currency,
    pub balances: Vec<Balance>,
    pub plan: Vec<SettlementSuggestion>,
    pub total_spent: Money,
}

impl BalanceReport {
    /// `true` when no transfer is needed ("all settled up").
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.plan.is_empty()
    }

    #[must_use]
    pub fn balance_of(&self, member: &MemberId) -> Option<&Balance> {
        self.balances.iter().find(|b| &b.member == member)
    }
}

/// Pure balance calculator configured with split and settlement policies.
///
/// The engine holds no state besides its policies, so a single instance can
/// be shared freely between threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceEngine {
    split: SplitPolicy,
    settlement: SettlementPolicy,
}

impl BalanceEngine {
    /// Return a builder for `BalanceEngine`. Help to build the struct.
    pub fn builder() -> BalanceEngineBuilder {
        BalanceEngineBuilder::default()
    }

    #[must_use]
    pub fn split_policy(&self) -> &SplitPolicy {
        &self.split
    }

    #[must_use]
    pub fn settlement_policy(&self) -> &SettlementPolicy {
        &self.settlement
    }

    pub fn balances(&self, snapshot: &Snapshot) -> ResultEngine<Vec<Balance>> {
        self.split
            .compute_balances(&snapshot.members, &snapshot.expenses, &snapshot.settlements)
    }

    #[must_use]
    pub fn plan(&self, balances: &[Balance]) -> Vec<SettlementSuggestion> {
        self.settlement.simplify(balances)
    }

    /// Computes balances and the settlement plan for `snapshot`.
    pub fn report(&self, snapshot: &Snapshot) -> ResultEngine<BalanceReport> {
        tracing::debug!(
            members = snapshot.members.len(),
            expenses = snapshot.expenses.len(),
            settlements = snapshot.settlements.len(),
            "computing balances"
        );
        let balances = self.balances(snapshot)?;
        let plan = self.plan(&balances);
        Ok(BalanceReport {
            currency: snapshot.currency,
            total_spent: snapshot.total_spent()?,
            balances,
            plan,
        })
    }
}

/// The builder for `BalanceEngine`
#[derive(Default)]
pub struct BalanceEngineBuilder {
    join_grace: Option<Duration>,
    epsilon: Option<Money>,
}

impl BalanceEngineBuilder {
    /// How long after an expense a new member still shares it by default.
    pub fn join_grace(mut self, join_grace: Duration) -> BalanceEngineBuilder {
        self.join_grace = Some(join_grace);
        self
    }

    /// Balances within `epsilon` of zero are considered settled.
    pub fn epsilon(mut self, epsilon: Money) -> BalanceEngineBuilder {
        self.epsilon = Some(epsilon);
        self
    }

    /// Like [`join_grace`](Self::join_grace), from a whole number of seconds
    /// as read from configuration or the command line.
    pub fn join_grace_secs(self, secs: i64) -> ResultEngine<BalanceEngineBuilder> {
        let grace = Duration::try_seconds(secs).ok_or_else(|| {
            EngineError::InvalidPolicy(format!("join grace of {secs}s is out of range"))
        })?;
        Ok(self.join_grace(grace))
    }

    /// Like [`epsilon`](Self::epsilon), in minor units (`0.5` is half a cent).
    pub fn epsilon_minor(self, minor: f64) -> ResultEngine<BalanceEngineBuilder> {
        let ticks = (minor * Money::TICKS_PER_MINOR as f64).round();
        if !ticks.is_finite() || ticks.abs() >= i64::MAX as f64 {
            return Err(EngineError::InvalidPolicy(format!(
                "epsilon of {minor} minor units is out of range"
            )));
        }
        Ok(self.epsilon(Money::from_ticks(ticks as i64)))
    }

    /// Construct `BalanceEngine`
    pub fn build(self) -> ResultEngine<BalanceEngine> {
        let split = match self.join_grace {
            Some(grace) => SplitPolicy::new(grace)?,
            None => SplitPolicy::default(),
        };
        let settlement = match self.epsilon {
            Some(epsilon) => SettlementPolicy::new(epsilon)?,
            None => SettlementPolicy::default(),
        };
        Ok(BalanceEngine { split, settlement })
    }
}
