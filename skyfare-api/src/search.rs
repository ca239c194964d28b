use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use skyfare_core::search::SearchRequest;
use skyfare_offer::generator::refine;
use skyfare_offer::{FilterState, RoundTripFilters, SearchResults, SortKey};
use skyfare_order::RecentSearch;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResultsRequest {
    pub search: SearchRequest,
    #[serde(default)]
    pub filters: FilterState,
    /// Inbound list of a round trip whose `filters.apply_to` is not `both`
    #[serde(default)]
    pub inbound_filters: Option<FilterState>,
    #[serde(default)]
    pub sort: SortKey,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", get(search_flights))
        .route("/v1/flights/results", post(flight_results))
}

/// Unfiltered rows and facet meta for the layout the query selects
pub async fn search_flights(
    State(state): State<AppState>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<SearchResults>, AppError> {
    let results = state.generator.search(&request).await?;

    if let Err(e) = state.recent.record(RecentSearch::from_request(&request)).await {
        warn!("Failed to record recent search: {}", e);
    }

    Ok(Json(results))
}

pub async fn flight_results(
    State(state): State<AppState>,
    Json(body): Json<ResultsRequest>,
) -> Result<Json<SearchResults>, AppError> {
    let results = state.generator.search(&body.search).await?;

    let filters = RoundTripFilters::from_states(body.filters, body.inbound_filters);
    Ok(Json(refine(results, &filters, body.sort)))
}
