use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{Expense, MemberId, Money};
use uuid::Uuid;

use api_types::{Created, expense::ExpenseNew};

use crate::{ServerError, server::ServerState};

pub async fn add(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<Created>, ServerError> {
    let currency = state.store.currency(group_id).await?;
    let expense = Expense {
        id: Uuid::new_v4(),
        amount: Money::from_major(payload.amount, currency)?,
        payer: MemberId::from(payload.payer),
        participants: payload.participants.into_iter().map(MemberId::from).collect(),
        created_at: payload.created_at.unwrap_or_else(Utc::now),
        category: payload.category,
        description: payload.description,
    };
    let id = state.store.add_expense(group_id, expense).await?;
    Ok(Json(Created { id }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path((group_id, expense_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state.store.delete_expense(group_id, expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
