use rating_types::ids::LedgerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitLedgerRequest {
    pub owner_id: String,
    pub service_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitLedgerResponse {
    pub ledger_id: LedgerId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRateRequest {
    pub rate: i64,
    pub rater_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub args: Vec<String>,
}
