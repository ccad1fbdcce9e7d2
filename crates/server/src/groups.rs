use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use api_types::{
    Created, convert,
    group::{GroupNew, GroupView},
};

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<Json<Created>, ServerError> {
    let currency = convert::currency_from_api(payload.currency.unwrap_or_default());
    let id = state.store.create_group(&payload.name, currency).await?;
    Ok(Json(Created { id }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.store.group(group_id).await?;
    Ok(Json(convert::group_view(group.id, &group.name, &group.ledger)))
}
