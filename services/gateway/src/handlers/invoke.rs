use crate::error::AppError;
use crate::models::InvokeRequest;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use rating_contract::Function;

/// Invoke a contract function by name, chaincode style.
///
/// Read-only functions are evaluated; the rest are submitted and committed.
pub async fn invoke(
    State(state): State<AppState>,
    Path(function): Path<String>,
    Json(payload): Json<InvokeRequest>,
) -> Result<Response, AppError> {
    let function: Function = function.parse()?;
    let contract = state.contract;
    let mut ledger = state.ledger.lock().await;

    let body = if function.is_read_only() {
        ledger.evaluate(|tx| contract.invoke(tx, function, &payload.args))?
    } else {
        ledger.submit(|tx| contract.invoke(tx, function, &payload.args))?
    };

    tracing::debug!(function = %function, bytes = body.len(), "Function invoked");
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
