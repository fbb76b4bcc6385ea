//! Form management and public form endpoints.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waforms_core::{FieldValue, FormDefinition, FormRef, FormsError, SaveForm};

use crate::auth;
use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/:id", get(get_form).put(update_form).delete(delete_form))
}

/// Row in the admin forms list.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub routing_tag: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&FormDefinition> for FormSummary {
    fn from(def: &FormDefinition) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            phone: def.phone.clone(),
            routing_tag: def.routing_tag(),
            updated_at: def.updated_at,
        }
    }
}

/// Save payload: top-level settings plus the builder's wire payload,
/// transmitted exactly as the builder serialized it.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFormRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub fields: String,
}

/// Submission entries, in display order.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub entries: Vec<(String, FieldValue)>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub deep_link: String,
}

pub async fn list_forms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FormSummary>>>, ApiError> {
    let mut forms = state.service.list_forms().await?;
    forms.sort_by(|a, b| a.name.cmp(&b.name));
    let summaries = forms.iter().map(FormSummary::from).collect();
    Ok(Json(ApiResponse::success(summaries)))
}

pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FormDefinition>>, ApiError> {
    let def = state
        .service
        .get_form(&id)
        .await?
        .ok_or_else(|| FormsError::NotFound(format!("form {} does not exist", id)))?;
    Ok(Json(ApiResponse::success(def)))
}

pub async fn create_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SaveFormRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FormDefinition>>), ApiError> {
    let actor = auth::actor_from_headers(&headers, &state.manage_secret);
    let token = auth::op_token(&headers);
    let def = state
        .service
        .save_form(
            &actor,
            &token,
            SaveForm {
                form_ref: FormRef::New,
                name: req.name,
                phone: req.phone,
                fields_json: req.fields,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(def))))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SaveFormRequest>,
) -> Result<Json<ApiResponse<FormDefinition>>, ApiError> {
    let actor = auth::actor_from_headers(&headers, &state.manage_secret);
    let token = auth::op_token(&headers);
    let def = state
        .service
        .save_form(
            &actor,
            &token,
            SaveForm {
                form_ref: FormRef::Existing(id),
                name: req.name,
                phone: req.phone,
                fields_json: req.fields,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(def)))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let actor = auth::actor_from_headers(&headers, &state.manage_secret);
    let token = auth::op_token(&headers);
    state.service.delete_form(&actor, &token, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Public render endpoint: the host maps a routing tag to this call.
pub async fn render_form(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let actor = auth::actor_from_headers(&headers, &state.manage_secret);
    let markup = state.service.render_by_tag(&actor, &tag).await?;
    Ok(Html(markup))
}

/// Public submit endpoint: returns the deep link the client opens.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<ApiResponse<SubmitResponse>>, ApiError> {
    let deep_link = state.service.submit(&tag, &req.entries).await?;
    Ok(Json(ApiResponse::success(SubmitResponse { deep_link })))
}
