use super::ledger_failure;
use crate::dtos::{LedgerResponse, PartyResponse};
use crate::middleware::TenantContext;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

#[tracing::instrument(skip(state, tenant), fields(business_id = %tenant.business_id))]
pub async fn get_ledger(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(party_id): Path<String>,
) -> Result<Json<LedgerResponse>, AppError> {
    let ledger = state
        .ledger
        .get_ledger(&tenant.business_id, &party_id)
        .await
        .map_err(ledger_failure)?;

    Ok(Json(LedgerResponse::from(ledger)))
}

#[tracing::instrument(skip(state, tenant), fields(business_id = %tenant.business_id))]
pub async fn recompute_balance(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(party_id): Path<String>,
) -> Result<Json<PartyResponse>, AppError> {
    let party = state
        .ledger
        .recompute_balance(&tenant.business_id, &party_id)
        .await
        .map_err(ledger_failure)?;

    Ok(Json(PartyResponse::from(party)))
}
