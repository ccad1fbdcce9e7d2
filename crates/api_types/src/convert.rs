//! Mapping between wire types (`api_types`) and engine types.
//!
//! Amounts cross the wire as major units; rounding for display happens only
//! here, never inside the engine.

use engine::{
    BalanceReport, Currency, Expense, Member, MemberId, Money, ResultEngine, Settlement, Snapshot,
};
use uuid::Uuid;

use crate::{
    balance::{BalanceReportView, BalanceView, SuggestionView},
    expense::ExpenseView,
    group::GroupView,
    member::MemberView,
    settlement::SettlementView,
    snapshot::SnapshotView,
};

pub fn currency_from_api(currency: crate::Currency) -> Currency {
    match currency {
        crate::Currency::Eur => Currency::Eur,
        crate::Currency::Usd => Currency::Usd,
        crate::Currency::Inr => Currency::Inr,
        crate::Currency::Jpy => Currency::Jpy,
    }
}

pub fn currency_to_api(currency: Currency) -> crate::Currency {
    match currency {
        Currency::Eur => crate::Currency::Eur,
        Currency::Usd => crate::Currency::Usd,
        Currency::Inr => crate::Currency::Inr,
        Currency::Jpy => crate::Currency::Jpy,
    }
}

pub fn member_view(member: &Member) -> MemberView {
    MemberView {
        id: member.id.to_string(),
        name: member.name.clone(),
        joined_at: member.joined_at,
        room: member.room.clone(),
        left_at: member.left_at,
    }
}

pub fn member_from_view(view: MemberView) -> Member {
    Member {
        id: MemberId::from(view.id),
        name: view.name,
        joined_at: view.joined_at,
        room: view.room,
        left_at: view.left_at,
    }
}

pub fn expense_view(expense: &Expense, currency: Currency) -> ExpenseView {
    ExpenseView {
        id: Some(expense.id),
        payer: expense.payer.to_string(),
        amount: expense.amount.to_major(currency),
        participants: expense.participants.iter().map(ToString::to_string).collect(),
        created_at: expense.created_at,
        category: expense.category.clone(),
        description: expense.description.clone(),
    }
}

pub fn expense_from_view(view: ExpenseView, currency: Currency) -> ResultEngine<Expense> {
    Ok(Expense {
        id: view.id.unwrap_or_else(Uuid::new_v4),
        amount: Money::from_major(view.amount, currency)?,
        payer: MemberId::from(view.payer),
        participants: view.participants.into_iter().map(MemberId::from).collect(),
        created_at: view.created_at,
        category: view.category,
        description: view.description,
    })
}

pub fn settlement_view(settlement: &Settlement, currency: Currency) -> SettlementView {
    SettlementView {
        id: Some(settlement.id),
        from: settlement.from.to_string(),
        to: settlement.to.to_string(),
        amount: settlement.amount.to_major(currency),
        created_at: settlement.created_at,
    }
}

pub fn settlement_from_view(view: SettlementView, currency: Currency) -> ResultEngine<Settlement> {
    Ok(Settlement {
        id: view.id.unwrap_or_else(Uuid::new_v4),
        amount: Money::from_major(view.amount, currency)?,
        from: MemberId::from(view.from),
        to: MemberId::from(view.to),
        created_at: view.created_at,
    })
}

pub fn snapshot_from_view(view: SnapshotView) -> ResultEngine<Snapshot> {
    let currency = currency_from_api(view.currency);
    Ok(Snapshot {
        currency,
        members: view.members.into_iter().map(member_from_view).collect(),
        expenses: view
            .expenses
            .into_iter()
            .map(|e| expense_from_view(e, currency))
            .collect::<ResultEngine<_>>()?,
        settlements: view
            .settlements
            .into_iter()
            .map(|s| settlement_from_view(s, currency))
            .collect::<ResultEngine<_>>()?,
    })
}

pub fn group_view(id: Uuid, name: &str, ledger: &Snapshot) -> GroupView {
    let currency = ledger.currency;
    GroupView {
        id,
        name: name.to_string(),
        currency: currency_to_api(currency),
        members: ledger.members.iter().map(member_view).collect(),
        expenses: ledger
            .expenses
            .iter()
            .map(|e| expense_view(e, currency))
            .collect(),
        settlements: ledger
            .settlements
            .iter()
            .map(|s| settlement_view(s, currency))
            .collect(),
    }
}

/// Builds the display report. `members` resolves ids to display names.
pub fn report_view(report: &BalanceReport, members: &[Member]) -> BalanceReportView {
    let currency = report.currency;
    let name_of = |id: &MemberId| {
        members
            .iter()
            .find(|m| &m.id == id)
            .map_or_else(|| id.to_string(), |m| m.name.clone())
    };

    BalanceReportView {
        currency: currency_to_api(currency),
        total_spent: report.total_spent.format(currency),
        settled: report.is_settled(),
        balances: report
            .balances
            .iter()
            .map(|b| BalanceView {
                member: b.member.to_string(),
                name: name_of(&b.member),
                paid: b.paid.format(currency),
                owed: b.owed.format(currency),
                net: b.net.format(currency),
                net_minor: b.net.round_to_minor(),
            })
            .collect(),
        plan: report
            .plan
            .iter()
            .map(|s| SuggestionView {
                from: s.from.to_string(),
                to: s.to.to_string(),
                amount: s.amount.format(currency),
                amount_minor: s.amount.round_to_minor(),
                amount_exact: s.amount.to_major(currency),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use engine::BalanceEngine;

    use super::*;

    #[test]
    fn report_view_rounds_for_display_only() {
        let now = Utc::now();
        let view = SnapshotView {
            currency: crate::Currency::Usd,
            members: vec![
                member_view(&Member::new("a", "Asha", now)),
                member_view(&Member::new("b", "Bilal", now)),
                member_view(&Member::new("c", "Chen", now)),
            ],
            expenses: vec![ExpenseView {
                id: None,
                payer: "a".to_string(),
                amount: 10.0,
                participants: Vec::new(),
                created_at: now,
                category: None,
                description: None,
            }],
            settlements: Vec::new(),
        };
        let snapshot = snapshot_from_view(view).unwrap();
        let report = BalanceEngine::default().report(&snapshot).unwrap();
        let view = report_view(&report, &snapshot.members);

        assert_eq!(view.total_spent, "10.00");
        assert_eq!(view.balances[0].net, "6.67");
        assert_eq!(view.balances[1].net_minor, -333);
        assert_eq!(view.plan.len(), 2);
        assert_eq!(view.plan[0].amount, "3.33");
        assert!((view.plan[0].amount_exact - 10.0 / 3.0).abs() < 1e-6);
        assert_eq!(view.balances[2].name, "Chen");
    }

    #[test]
    fn nan_amounts_never_reach_the_engine() {
        let view = SettlementView {
            id: None,
            from: "a".to_string(),
            to: "b".to_string(),
            amount: f64::NAN,
            created_at: Utc::now(),
        };
        assert!(settlement_from_view(view, Currency::Eur).is_err());
    }
}
