use rocket::{post, serde::json::Json, State};
use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiError;
use crate::server::ServerState;

/// The actions the web client may dispatch. Deserialization rejects anything
/// outside this enum, so an unrecognized action name never reaches a handler;
/// it is answered by the 422 catcher instead.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum Action {
    #[serde(rename = "listActivityTypes")]
    ListActivityTypes,
    #[serde(rename = "updateLeadStatus")]
    UpdateLeadStatus,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: Action,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadStatusPayload {
    pub lead_id: u64,
    /// Application status code 0-6, not a Copper status id.
    pub status_id: u8,
}

/// Single dispatch endpoint for client-initiated Copper interactions.
#[post("/copper/receive", data = "<request>")]
pub async fn receive_action(
    state: &State<ServerState>,
    request: Json<ActionRequest>,
) -> Result<Json<Value>, ApiError> {
    let ActionRequest { action, payload } = request.into_inner();

    match action {
        Action::ListActivityTypes => {
            let catalog = state.copper.list_activity_types().await?;
            Ok(Json(catalog))
        }
        Action::UpdateLeadStatus => {
            let payload: UpdateLeadStatusPayload = serde_json::from_value(payload)
                .map_err(|e| ApiError::bad_request(format!("invalid updateLeadStatus payload: {}", e)))?;

            let updated = state
                .copper
                .update_lead_status(payload.lead_id, payload.status_id)
                .await?;
            Ok(Json(updated))
        }
    }
}
