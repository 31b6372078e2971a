use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::Html,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::app::AppState;
use crate::database::models::{CatSummary, DogSummary};
use crate::error::ApiError;
use crate::views::View;

/// Shown on the home page when there is no cat to name
pub const DEFAULT_CAT_NAME: &str = "unknown";

fn render<S: Serialize>(state: &AppState, view: View, context: S) -> Result<Html<String>, ApiError> {
    Ok(Html(state.views.render(view, context)?))
}

/// GET / - home page naming the most recently created cat
///
/// Store failures never fail this page; they are logged and the default
/// name is shown instead.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let name = match state.store.latest_cat().await {
        Ok(Some(cat)) => cat.name,
        Ok(None) => DEFAULT_CAT_NAME.to_string(),
        Err(e) => {
            warn!("Could not load latest cat for home page: {}", e);
            DEFAULT_CAT_NAME.to_string()
        }
    };
    render(&state, View::Home, json!({ "name": name }))
}

/// GET /page1 - all cats
pub async fn page1(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let cats: Vec<CatSummary> = state
        .store
        .list_cats()
        .await?
        .into_iter()
        .map(CatSummary::from)
        .collect();
    render(&state, View::Page1, json!({ "cats": cats }))
}

pub async fn page2(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, View::Page2, json!({}))
}

pub async fn page3(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, View::Page3, json!({}))
}

/// GET /page4 - all dogs
pub async fn page4(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let dogs: Vec<DogSummary> = state
        .store
        .list_dogs()
        .await?
        .into_iter()
        .map(DogSummary::from)
        .collect();
    render(&state, View::Page4, json!({ "dogs": dogs }))
}

/// Fallback for every unmatched route
pub async fn not_found(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<(StatusCode, Html<String>), ApiError> {
    let page = render(&state, View::NotFound, json!({ "path": uri.path() }))?;
    Ok((StatusCode::NOT_FOUND, page))
}
