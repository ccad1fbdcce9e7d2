//! In-memory ledger storage.
//!
//! The engine never touches storage. This module plays the two collaborators
//! it relies on: a [`SnapshotProvider`] handing out consistent copies of a
//! group's ledger and a [`SettlementRecorder`] appending transfers.

use std::{collections::HashMap, future::Future};

use chrono::{DateTime, Utc};
use engine::{
    Currency, EngineError, Expense, Member, MemberId, ResultEngine, Settlement, Snapshot,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Supplies a point-in-time copy of a group's members and ledger.
pub trait SnapshotProvider {
    fn snapshot(&self, group_id: Uuid) -> impl Future<Output = ResultEngine<Snapshot>> + Send;
}

/// Appends recorded settlements. Recorded rows are never edited.
pub trait SettlementRecorder {
    fn record_settlement(
        &self,
        group_id: Uuid,
        settlement: Settlement,
    ) -> impl Future<Output = ResultEngine<Uuid>> + Send;
}

#[derive(Clone, Debug)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub ledger: Snapshot,
}

/// Groups kept behind a single async lock.
///
/// Writers take the write lock for the whole append, so a reader always sees
/// either all of a write or none of it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: RwLock<HashMap<Uuid, Group>>,
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn group_not_found(group_id: Uuid) -> EngineError {
    EngineError::KeyNotFound(format!("group {group_id}"))
}

fn member_mut<'a>(ledger: &'a mut Snapshot, member_id: &MemberId) -> ResultEngine<&'a mut Member> {
    ledger
        .members
        .iter_mut()
        .find(|m| &m.id == member_id)
        .ok_or_else(|| EngineError::KeyNotFound(format!("member {member_id}")))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_group(&self, name: &str, currency: Currency) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "group")?;
        let id = Uuid::new_v4();
        let group = Group {
            id,
            name,
            ledger: Snapshot {
                currency,
                ..Snapshot::default()
            },
        };
        self.groups.write().await.insert(id, group);
        tracing::info!(group = %id, "group created");
        Ok(id)
    }

    pub async fn group(&self, group_id: Uuid) -> ResultEngine<Group> {
        self.groups
            .read()
            .await
            .get(&group_id)
            .cloned()
            .ok_or_else(|| group_not_found(group_id))
    }

    pub async fn currency(&self, group_id: Uuid) -> ResultEngine<Currency> {
        self.groups
            .read()
            .await
            .get(&group_id)
            .map(|g| g.ledger.currency)
            .ok_or_else(|| group_not_found(group_id))
    }

    pub async fn add_member(
        &self,
        group_id: Uuid,
        name: &str,
        room: Option<&str>,
        joined_at: DateTime<Utc>,
    ) -> ResultEngine<Member> {
        let name = normalize_required_name(name, "member")?;
        let mut member = Member::new(Uuid::new_v4().to_string(), name, joined_at);
        member.room = normalize_optional_text(room);

        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| group_not_found(group_id))?;
        group.ledger.members.push(member.clone());
        Ok(member)
    }

    pub async fn rename_member(
        &self,
        group_id: Uuid,
        member_id: &MemberId,
        name: &str,
    ) -> ResultEngine<()> {
        let name = normalize_required_name(name, "member")?;
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| group_not_found(group_id))?;
        member_mut(&mut group.ledger, member_id)?.name = name;
        Ok(())
    }

    /// Unlinks a member. The id stays in the roster for historical rows.
    /// Unlinking twice keeps the first timestamp.
    pub async fn unlink_member(
        &self,
        group_id: Uuid,
        member_id: &MemberId,
        at: DateTime<Utc>,
    ) -> ResultEngine<()> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| group_not_found(group_id))?;
        let member = member_mut(&mut group.ledger, member_id)?;
        member.left_at.get_or_insert(at);
        Ok(())
    }

    pub async fn add_expense(&self, group_id: Uuid, mut expense: Expense) -> ResultEngine<Uuid> {
        expense.category = normalize_optional_text(expense.category.as_deref());
        expense.description = normalize_optional_text(expense.description.as_deref());
        let id = expense.id;

        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| group_not_found(group_id))?;
        group.ledger.push_expense(expense)?;
        Ok(id)
    }

    /// Deletes an expense unless a settlement was recorded after it.
    pub async fn delete_expense(&self, group_id: Uuid, expense_id: Uuid) -> ResultEngine<()> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| group_not_found(group_id))?;
        let ledger = &mut group.ledger;

        let position = ledger
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {expense_id}")))?;
        let created_at = ledger.expenses[position].created_at;
        if ledger.settlements.iter().any(|s| s.created_at >= created_at) {
            return Err(EngineError::ExpenseLocked(format!(
                "expense {expense_id} was already settled against"
            )));
        }
        ledger.expenses.remove(position);
        Ok(())
    }
}

impl SnapshotProvider for MemoryStore {
    async fn snapshot(&self, group_id: Uuid) -> ResultEngine<Snapshot> {
        self.groups
            .read()
            .await
            .get(&group_id)
            .map(|g| g.ledger.clone())
            .ok_or_else(|| group_not_found(group_id))
    }
}

impl SettlementRecorder for MemoryStore {
    async fn record_settlement(&self, group_id: Uuid, settlement: Settlement) -> ResultEngine<Uuid> {
        let id = settlement.id;
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| group_not_found(group_id))?;
        group.ledger.push_settlement(settlement)?;
        tracing::info!(group = %group_id, settlement = %id, "settlement recorded");
        Ok(id)
    }
}
