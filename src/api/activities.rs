use rocket::{get, serde::json::Json, State};
use serde_json::Value;

use crate::api::ApiError;
use crate::server::ServerState;

/// Copper's live activity-type catalog, passed through untouched.
#[get("/activities")]
pub async fn get_activities(state: &State<ServerState>) -> Result<Json<Value>, ApiError> {
    let catalog = state.copper.list_activity_types().await?;

    Ok(Json(catalog))
}
