use rocket::{get, serde::json::Json, State};

use crate::api::ApiError;
use crate::copper::shaper;
use crate::models::{Lead, PrettyLead};
use crate::server::ServerState;

/// Recently interacted leads exactly as Copper returns them.
#[get("/raw-leads")]
pub async fn get_raw_leads(state: &State<ServerState>) -> Result<Json<Vec<Lead>>, ApiError> {
    let leads = shaper::recently_interacted_leads(&state.copper, &state.config).await?;

    Ok(Json(leads))
}

/// Recently interacted leads in the reduced client-facing shape.
#[get("/leads")]
pub async fn get_leads(state: &State<ServerState>) -> Result<Json<Vec<PrettyLead>>, ApiError> {
    let leads = shaper::pretty_recently_interacted_leads(&state.copper, &state.config).await?;

    Ok(Json(leads))
}
