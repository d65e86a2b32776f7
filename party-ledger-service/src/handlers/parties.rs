use super::ledger_failure;
use crate::dtos::{CreatePartyRequest, PartyResponse, UpdateOpeningBalanceRequest};
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
pub async fn create_party(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(request): Json<CreatePartyRequest>,
) -> Result<(StatusCode, Json<PartyResponse>), AppError> {
    request.validate()?;

    let party = state
        .ledger
        .create_party(&tenant.business_id, request.into())
        .await
        .map_err(ledger_failure)?;

    Ok((StatusCode::CREATED, Json(PartyResponse::from(party))))
}

#[tracing::instrument(skip(state, tenant), fields(business_id = %tenant.business_id))]
pub async fn delete_party(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(party_id): Path<String>,
) -> Result<Json<PartyResponse>, AppError> {
    let party = state
        .ledger
        .delete_party(&tenant.business_id, &party_id)
        .await
        .map_err(ledger_failure)?;

    Ok(Json(PartyResponse::from(party)))
}

#[tracing::instrument(skip(state, tenant, request), fields(business_id = %tenant.business_id))]
pub async fn update_opening_balance(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(party_id): Path<String>,
    Json(request): Json<UpdateOpeningBalanceRequest>,
) -> Result<Json<PartyResponse>, AppError> {
    let party = state
        .ledger
        .update_opening_balance(
            &tenant.business_id,
            &party_id,
            request.opening_balance,
            request.balance_type,
        )
        .await
        .map_err(ledger_failure)?;

    Ok(Json(PartyResponse::from(party)))
}
