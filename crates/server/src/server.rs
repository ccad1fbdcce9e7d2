use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use std::sync::Arc;

use crate::{balances, expenses, groups, members, settlements, store::MemoryStore};
use engine::BalanceEngine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: BalanceEngine,
    pub store: Arc<MemoryStore>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/groups", post(groups::create))
        .route("/groups/{group_id}", get(groups::get))
        .route("/groups/{group_id}/members", post(members::add))
        .route(
            "/groups/{group_id}/members/{member_id}",
            patch(members::rename).delete(members::unlink),
        )
        .route("/groups/{group_id}/expenses", post(expenses::add))
        .route(
            "/groups/{group_id}/expenses/{expense_id}",
            delete(expenses::delete),
        )
        .route("/groups/{group_id}/settlements", post(settlements::record))
        .route("/groups/{group_id}/balances", get(balances::get))
        .route("/balances", post(balances::compute))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: BalanceEngine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine,
        store: Arc::new(MemoryStore::new()),
    };

    axum::serve(listener, router(state)).await
}
