//! "Mark as paid": records a real transfer between two members.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use engine::{MemberId, Money, Settlement};

use api_types::{Created, settlement::SettlementNew};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, store::SettlementRecorder};

pub async fn record(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<SettlementNew>,
) -> Result<Json<Created>, ServerError> {
    if payload.from == payload.to {
        return Err(ServerError::Generic(
            "a settlement needs two different members".to_string(),
        ));
    }
    let currency = state.store.currency(group_id).await?;
    let settlement = Settlement::new(
        MemberId::from(payload.from),
        MemberId::from(payload.to),
        Money::from_major(payload.amount, currency)?,
        payload.created_at.unwrap_or_else(Utc::now),
    );
    let id = state.store.record_settlement(group_id, settlement).await?;
    Ok(Json(Created { id }))
}
