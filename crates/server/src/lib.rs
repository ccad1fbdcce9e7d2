use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};
pub use store::{Group, MemoryStore, SettlementRecorder, SnapshotProvider};

mod balances;
mod expenses;
mod groups;
mod members;
mod server;
mod settlements;
mod store;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) | EngineError::Referential(_) => StatusCode::NOT_FOUND,
        EngineError::ExpenseLocked(_) => StatusCode::CONFLICT,
        EngineError::InvalidAmount(_)
        | EngineError::EmptyRoster
        | EngineError::DuplicateMember(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidPolicy(_)
        | EngineError::UnsupportedCurrency(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                tracing::debug!("request rejected: {err}");
                (status_for_engine_error(&err), err.to_string())
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
