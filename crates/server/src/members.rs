//! Group roster endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::MemberId;
use uuid::Uuid;

use api_types::{
    convert,
    member::{MemberNew, MemberRename, MemberView},
};

use crate::{ServerError, server::ServerState};

pub async fn add(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<MemberNew>,
) -> Result<Json<MemberView>, ServerError> {
    let member = state
        .store
        .add_member(
            group_id,
            &payload.name,
            payload.room.as_deref(),
            payload.joined_at.unwrap_or_else(Utc::now),
        )
        .await?;
    Ok(Json(convert::member_view(&member)))
}

pub async fn rename(
    State(state): State<ServerState>,
    Path((group_id, member_id)): Path<(Uuid, String)>,
    Json(payload): Json<MemberRename>,
) -> Result<StatusCode, ServerError> {
    state
        .store
        .rename_member(group_id, &MemberId::from(member_id), &payload.name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unlinks the member; their past expenses and settlements stay in the ledger.
pub async fn unlink(
    State(state): State<ServerState>,
    Path((group_id, member_id)): Path<(Uuid, String)>,
) -> Result<StatusCode, ServerError> {
    state
        .store
        .unlink_member(group_id, &MemberId::from(member_id), Utc::now())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
