use crate::error::AppError;
use crate::models::{ExistsResponse, InitLedgerRequest, InitLedgerResponse, RegisterRateRequest};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rating_types::history::HistoryQueryResult;
use rating_types::ids::LedgerId;
use rating_types::rating::Rating;

pub async fn init_ledger(
    State(state): State<AppState>,
    Json(payload): Json<InitLedgerRequest>,
) -> Result<(StatusCode, Json<InitLedgerResponse>), AppError> {
    let contract = state.contract;
    let mut ledger = state.ledger.lock().await;

    let ledger_id = ledger.submit(|tx| {
        contract.init_ledger(tx, &payload.owner_id, &payload.service_type)
    })?;

    Ok((StatusCode::CREATED, Json(InitLedgerResponse { ledger_id })))
}

pub async fn read_ledger(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
) -> Result<Json<Rating>, AppError> {
    let contract = state.contract;
    let ledger_id = LedgerId::new(ledger_id);
    let mut ledger = state.ledger.lock().await;

    let rating = ledger.evaluate(|tx| contract.read_ledger(tx, &ledger_id))?;
    Ok(Json(rating))
}

pub async fn ledger_exists(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
) -> Result<Json<ExistsResponse>, AppError> {
    let contract = state.contract;
    let ledger_id = LedgerId::new(ledger_id);
    let mut ledger = state.ledger.lock().await;

    let exists = ledger.evaluate(|tx| contract.ledger_exists(tx, &ledger_id))?;
    Ok(Json(ExistsResponse { exists }))
}

pub async fn register_rate(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
    Json(payload): Json<RegisterRateRequest>,
) -> Result<StatusCode, AppError> {
    let contract = state.contract;
    let ledger_id = LedgerId::new(ledger_id);
    let mut ledger = state.ledger.lock().await;

    ledger.submit(|tx| {
        contract.register_rate(tx, &ledger_id, payload.rate, &payload.rater_id)
    })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_all_ratings(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
) -> Result<Json<Vec<HistoryQueryResult>>, AppError> {
    let contract = state.contract;
    let ledger_id = LedgerId::new(ledger_id);
    let mut ledger = state.ledger.lock().await;

    let records = ledger.evaluate(|tx| contract.get_all_ratings(tx, &ledger_id))?;
    Ok(Json(records))
}
