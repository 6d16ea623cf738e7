use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::Ack;
use serde::Deserialize;
use service::company::{
    domain::{Company, CompanyPage, CreateCompanyInput, UpdateCompanyInput},
    repository::CompanyRepository,
    validation,
};
use service::pagination::PageRequest;
use tracing::info;

use crate::{errors::JsonApiError, routes::AppState};

/// Raw pagination query; values are parsed leniently so junk falls back to defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, alias = "pagina")]
    pub page: Option<String>,
    #[serde(default, alias = "limite", alias = "limit")]
    pub page_size: Option<String>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, vec![e.body_text()]))
}

pub async fn create<R: CompanyRepository + 'static>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateCompanyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Ack>), JsonApiError> {
    let input = body(payload)?;
    validation::validate_create(&input)?;
    info!(tax_id = %input.tax_id, "company_create_request");
    let ack = state.companies.create(input).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

pub async fn list<R: CompanyRepository + 'static>(
    State(state): State<AppState<R>>,
    Query(q): Query<ListQuery>,
) -> Result<Json<CompanyPage>, JsonApiError> {
    let req = PageRequest::from_raw(q.page.as_deref(), q.page_size.as_deref());
    let page = state.companies.list(req).await?;
    info!(count = page.data.len(), total = page.meta.total, "list companies");
    Ok(Json(page))
}

pub async fn get<R: CompanyRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(tax_id): Path<String>,
) -> Result<Json<Company>, JsonApiError> {
    Ok(Json(state.companies.find_by_tax_id(&tax_id).await?))
}

pub async fn update<R: CompanyRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(tax_id): Path<String>,
    payload: Result<Json<UpdateCompanyInput>, JsonRejection>,
) -> Result<Json<Ack>, JsonApiError> {
    let input = body(payload)?;
    validation::validate_update(&input)?;
    let ack = state.companies.update(&tax_id, input).await?;
    info!(%tax_id, "updated company");
    Ok(Json(ack))
}

pub async fn delete<R: CompanyRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(tax_id): Path<String>,
) -> Result<Json<Ack>, JsonApiError> {
    let ack = state.companies.delete(&tax_id).await?;
    info!(%tax_id, "deleted company");
    Ok(Json(ack))
}
