pub mod actions;
pub mod activities;
pub mod leads;
pub mod spa;

pub use actions::*;
pub use activities::*;
pub use leads::*;
pub use spa::*;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::copper::CopperError;

/// Error envelope returned whenever a route or catcher fails. Successful
/// routes return their payload bare, matching what the web client expects.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Route-level failure carrying the client-facing status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: String) -> Self {
        Self {
            status: Status::BadRequest,
            message,
        }
    }
}

impl From<CopperError> for ApiError {
    fn from(err: CopperError) -> Self {
        let status = match err {
            // the client sent a code outside the mapping table
            CopperError::UnmappedStatusCode(_) => Status::BadRequest,
            // everything else is the upstream CRM misbehaving
            CopperError::Http(_)
            | CopperError::Api { .. }
            | CopperError::Decode(_)
            | CopperError::UnknownActivityType(_)
            | CopperError::UnknownStatusName(_) => Status::BadGateway,
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        Custom(self.status, Json(ApiResponse::error(self.message))).respond_to(request)
    }
}
