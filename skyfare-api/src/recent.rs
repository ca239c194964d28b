use axum::{extract::State, routing::get, Json, Router};
use skyfare_order::RecentSearch;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/searches/recent", get(list_recent))
}

pub async fn list_recent(State(state): State<AppState>) -> Json<Vec<RecentSearch>> {
    Json(state.recent.list().await)
}
