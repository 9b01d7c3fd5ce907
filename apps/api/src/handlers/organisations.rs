use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateOrganisationRequest, DeletionResponse, OrganisationResponse, UpdateOrganisationRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_organisations_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<OrganisationResponse>>> {
    let organisations = state
        .directory_service
        .list_organisations()
        .await?
        .into_iter()
        .map(OrganisationResponse::from)
        .collect();

    Ok(Json(organisations))
}

pub async fn create_organisation_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrganisationRequest>,
) -> ApiResult<(StatusCode, Json<OrganisationResponse>)> {
    let organisation = state
        .directory_service
        .create_organisation(payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrganisationResponse::from(organisation)),
    ))
}

pub async fn get_organisation_handler(
    State(state): State<AppState>,
    Path(oid): Path<String>,
) -> ApiResult<Json<OrganisationResponse>> {
    let organisation = state.directory_service.get_organisation(&oid).await?;
    Ok(Json(OrganisationResponse::from(organisation)))
}

pub async fn update_organisation_handler(
    State(state): State<AppState>,
    Path(oid): Path<String>,
    Json(payload): Json<UpdateOrganisationRequest>,
) -> ApiResult<Json<OrganisationResponse>> {
    let organisation = state
        .directory_service
        .update_organisation(&oid, payload.into())
        .await?;

    Ok(Json(OrganisationResponse::from(organisation)))
}

pub async fn delete_organisation_handler(
    State(state): State<AppState>,
    Path(oid): Path<String>,
) -> ApiResult<Json<DeletionResponse>> {
    let report = state.directory_service.delete_organisation(&oid).await?;
    Ok(Json(DeletionResponse::from(report)))
}
