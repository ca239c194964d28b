use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skyfare_core::search::SearchRequest;
use skyfare_order::{BookingDraft, DraftSelection};

use crate::error::AppError;
use crate::state::AppState;

/// The search the rows came from plus the picked row(s) and fare(s).
/// Travellers are taken from the search.
#[derive(Debug, Deserialize)]
pub struct CreateDraftRequest {
    pub search: SearchRequest,
    #[serde(flatten)]
    pub selection: DraftSelection,
}

#[derive(Debug, Serialize)]
pub struct DraftCreated {
    pub draft_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/drafts", post(create_draft))
        .route("/v1/drafts/{id}", get(get_draft).delete(clear_draft))
}

/// Re-runs the search so the stored flight, fare and pricing come from the catalog.
pub async fn create_draft(
    State(state): State<AppState>,
    Json(body): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<DraftCreated>), AppError> {
    let results = state.generator.search(&body.search).await?;
    let draft = BookingDraft::from_results(&results, &body.selection, body.search.travellers())?;

    let draft_id = state.drafts.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(DraftCreated { draft_id })))
}

pub async fn get_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> Result<Json<BookingDraft>, AppError> {
    state
        .drafts
        .load(&draft_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Draft {} not found", draft_id)))
}

pub async fn clear_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.drafts.clear(&draft_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
