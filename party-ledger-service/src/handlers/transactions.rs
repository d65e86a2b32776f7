use super::ledger_failure;
use crate::dtos::{RecordTransactionRequest, TransactionOutcomeResponse, UpdateTransactionRequest};
use crate::middleware::TenantContext;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

#[tracing::instrument(skip(state, tenant, request), fields(business_id = %tenant.business_id))]
pub async fn record_transaction(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(party_id): Path<String>,
    Json(request): Json<RecordTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionOutcomeResponse>), AppError> {
    request.validate()?;

    let outcome = state
        .ledger
        .record_transaction(&tenant.business_id, &party_id, request.into())
        .await
        .map_err(ledger_failure)?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

#[tracing::instrument(skip(state, tenant, request), fields(business_id = %tenant.business_id))]
pub async fn update_transaction(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(transaction_id): Path<String>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<TransactionOutcomeResponse>, AppError> {
    request.validate()?;

    let outcome = state
        .ledger
        .update_transaction(&tenant.business_id, &transaction_id, request.into())
        .await
        .map_err(ledger_failure)?;

    Ok(Json(outcome.into()))
}

#[tracing::instrument(skip(state, tenant), fields(business_id = %tenant.business_id))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(transaction_id): Path<String>,
) -> Result<Json<TransactionOutcomeResponse>, AppError> {
    let outcome = state
        .ledger
        .delete_transaction(&tenant.business_id, &transaction_id)
        .await
        .map_err(ledger_failure)?;

    Ok(Json(outcome.into()))
}
