use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use api_types::{balance::BalanceReportView, convert, snapshot::SnapshotView};

use crate::{ServerError, server::ServerState, store::SnapshotProvider};

/// Balances and settlement plan for a stored group, recomputed from a fresh snapshot.
pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BalanceReportView>, ServerError> {
    let snapshot = state.store.snapshot(group_id).await?;
    let report = state.engine.report(&snapshot)?;
    Ok(Json(convert::report_view(&report, &snapshot.members)))
}

/// Balances and settlement plan for a ledger sent in the request body.
pub async fn compute(
    State(state): State<ServerState>,
    Json(payload): Json<SnapshotView>,
) -> Result<Json<BalanceReportView>, ServerError> {
    let snapshot = convert::snapshot_from_view(payload)?;
    let report = state.engine.report(&snapshot)?;
    Ok(Json(convert::report_view(&report, &snapshot.members)))
}
