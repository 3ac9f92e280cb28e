use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{catch, catchers, routes, Build, Request, Response, Rocket};

use crate::api;
use crate::api::ApiResponse;
use crate::config::Config;
use crate::copper::CopperClient;

pub struct ServerState {
    pub config: Config,
    pub copper: CopperClient,
}

/// Permissive CORS so the web client can call us from its own origin during
/// development.
pub struct PermissiveCors;

#[rocket::async_trait]
impl Fairing for PermissiveCors {
    fn info(&self) -> Info {
        Info {
            name: "Permissive CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[catch(400)]
fn bad_request() -> Custom<Json<ApiResponse>> {
    Custom(
        Status::BadRequest,
        Json(ApiResponse::error("malformed request".to_string())),
    )
}

// Unknown action names land here: Json<ActionRequest> refuses to parse them.
#[catch(422)]
fn unprocessable_entity() -> Custom<Json<ApiResponse>> {
    Custom(
        Status::UnprocessableEntity,
        Json(ApiResponse::error(
            "unrecognized action or malformed request body".to_string(),
        )),
    )
}

#[catch(500)]
fn internal_error() -> Custom<Json<ApiResponse>> {
    Custom(
        Status::InternalServerError,
        Json(ApiResponse::error("internal server error".to_string())),
    )
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    let copper = CopperClient::new(&config);
    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .manage(ServerState { config, copper })
        .attach(PermissiveCors)
        .register(
            "/",
            catchers![bad_request, unprocessable_entity, internal_error],
        )
        .mount(
            "/",
            routes![
                api::get_raw_leads,
                api::get_leads,
                api::get_activities,
                api::receive_action,
                api::spa_fallback,
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::ContentType;
    use rocket::local::blocking::Client;
    use std::fs;

    fn test_config() -> Config {
        let static_dir =
            std::env::temp_dir().join(format!("copper-relay-test-{}", std::process::id()));
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(static_dir.join("index.html"), "<html>spa entry</html>").unwrap();
        fs::write(static_dir.join("app.css"), "body{margin:0}").unwrap();

        Config {
            api_token: "test-token".to_string(),
            user_email: "test@example.com".to_string(),
            port: 0,
            lead_tracking_field_id: 1,
            marketing_source_field_id: 2,
            static_dir,
        }
    }

    fn client() -> Client {
        Client::tracked(build_rocket(test_config())).expect("valid rocket")
    }

    #[test]
    fn unknown_action_yields_defined_error() {
        let client = client();
        let response = client
            .post("/copper/receive")
            .header(ContentType::JSON)
            .body(r#"{"action": "unknownAction", "payload": {}}"#)
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: ApiResponse = response.into_json().unwrap();
        assert!(!body.success);
        assert!(body.error.is_some());
    }

    #[test]
    fn malformed_json_body_is_a_bad_request() {
        let client = client();
        let response = client
            .post("/copper/receive")
            .header(ContentType::JSON)
            .body("{not json")
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let body: ApiResponse = response.into_json().unwrap();
        assert!(!body.success);
    }

    #[test]
    fn bad_update_payload_is_rejected_before_any_copper_call() {
        let client = client();
        let response = client
            .post("/copper/receive")
            .header(ContentType::JSON)
            .body(r#"{"action": "updateLeadStatus", "payload": {"leadId": "nope"}}"#)
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let body: ApiResponse = response.into_json().unwrap();
        assert!(body.error.unwrap().contains("updateLeadStatus payload"));
    }

    #[test]
    fn unclaimed_paths_serve_the_spa_entry_point() {
        let client = client();
        let response = client.get("/nonexistent-path").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains("spa entry"));
    }

    #[test]
    fn nested_client_routes_also_serve_the_entry_point() {
        let client = client();
        let response = client.get("/dashboard/leads/42").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains("spa entry"));
    }

    #[test]
    fn existing_static_assets_are_served_directly() {
        let client = client();
        let response = client.get("/app.css").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "body{margin:0}");
    }

    #[test]
    fn responses_carry_permissive_cors_headers() {
        let client = client();
        let response = client.get("/nonexistent-path").dispatch();

        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("*")
        );
    }
}
