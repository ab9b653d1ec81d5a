//! Request dispatch.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handler::RequestHandler;
use crate::response::{ApiReply, ApiResponse};
use airtrack_core::EntityKind;
use airtrack_store::KvStore;
use std::sync::Arc;

/// The tracker server: routes parsed requests to handlers.
///
/// HTTP framing is the embedding application's concern; it hands this
/// server the method, path, and body and writes back the status, headers,
/// and JSON the returned [`ApiReply`] describes. Preflight `OPTIONS`
/// requests are answered with an empty 204 and the fixed CORS headers,
/// unknown routes with a 404 envelope.
pub struct TrackerServer {
    config: ServerConfig,
    handler: RequestHandler,
}

impl TrackerServer {
    /// Creates a server over the given store.
    pub fn new(config: ServerConfig, store: Arc<dyn KvStore>) -> Self {
        Self {
            config,
            handler: RequestHandler::new(store),
        }
    }

    /// Creates a server around an existing handler.
    pub fn with_handler(config: ServerConfig, handler: RequestHandler) -> Self {
        Self { config, handler }
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Dispatches one request.
    ///
    /// `method` is matched case-insensitively; `path` is the URL path with
    /// or without a trailing slash; `body` is the raw request body (empty
    /// string for bodiless requests).
    #[must_use]
    pub fn handle(&self, method: &str, path: &str, body: &str) -> ApiReply {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return ApiReply::no_content();
        }

        if body.len() > self.config.max_body_bytes {
            return ApiReply::from_error(&ServerError::InvalidRequest(format!(
                "body exceeds {} bytes",
                self.config.max_body_bytes
            )));
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let get = method.eq_ignore_ascii_case("GET");
        let post = method.eq_ignore_ascii_case("POST");
        let delete = method.eq_ignore_ascii_case("DELETE");

        match segments.as_slice() {
            [] if get => self.handler.api_info(),
            [kind_seg, rest @ ..] => match kind_from_route(kind_seg) {
                Some(kind) => match rest {
                    [] if get => self.handler.list_online(kind),
                    ["callsign", callsign] if get => self.handler.get_by_callsign(kind, callsign),
                    ["online"] if post => self.handler.set_online(kind, body),
                    ["offline"] if post => self.handler.set_offline(kind, body),
                    [cid] if get => self.handler.get_by_cid(kind, cid),
                    [cid] if delete => self.handler.remove(kind, cid),
                    _ => not_found(),
                },
                None => not_found(),
            },
            _ => not_found(),
        }
    }
}

impl std::fmt::Debug for TrackerServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerServer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn kind_from_route(segment: &str) -> Option<EntityKind> {
    match segment {
        "controllers" => Some(EntityKind::Controller),
        "pilots" => Some(EntityKind::Pilot),
        _ => None,
    }
}

fn not_found() -> ApiReply {
    ApiReply::with_status(404, ApiResponse::failure("endpoint not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtrack_store::{MemoryStore, StoreError, StoreResult};
    use serde_json::{json, Value};

    fn server() -> TrackerServer {
        TrackerServer::new(ServerConfig::default(), Arc::new(MemoryStore::new()))
    }

    fn body_value(reply: &ApiReply) -> Value {
        serde_json::from_str(&reply.body_json().unwrap()).unwrap()
    }

    #[test]
    fn root_returns_api_info() {
        let server = server();
        let reply = server.handle("GET", "/", "");
        assert_eq!(reply.status, 200);
        assert_eq!(body_value(&reply)["data"]["name"], json!("Airtrack API"));
    }

    #[test]
    fn full_controller_lifecycle_over_routes() {
        let server = server();

        let reply = server.handle(
            "POST",
            "/controllers/online",
            r#"{"cid": "123", "callsign": "ual1", "frequency": "118.300"}"#,
        );
        assert_eq!(reply.status, 200);

        let reply = server.handle("GET", "/controllers/123", "");
        assert_eq!(body_value(&reply)["data"]["callsign"], json!("UAL1"));

        let reply = server.handle("GET", "/controllers/callsign/UAL1", "");
        assert_eq!(body_value(&reply)["data"]["cid"], json!("123"));

        let reply = server.handle("GET", "/controllers", "");
        assert_eq!(body_value(&reply)["count"], json!(1));

        let reply = server.handle("POST", "/controllers/offline", r#"{"cid": "123"}"#);
        assert_eq!(body_value(&reply)["data"]["status"], json!("offline"));

        let reply = server.handle("DELETE", "/controllers/123", "");
        assert_eq!(reply.status, 200);

        let reply = server.handle("GET", "/controllers/123", "");
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn pilots_and_controllers_route_to_separate_rosters() {
        let server = server();
        server.handle(
            "POST",
            "/pilots/online",
            r#"{"cid": "456", "callsign": "UAL1", "aircraft": "B738"}"#,
        );

        let reply = server.handle("GET", "/controllers", "");
        assert_eq!(body_value(&reply)["count"], json!(0));
        let reply = server.handle("GET", "/pilots", "");
        assert_eq!(body_value(&reply)["count"], json!(1));
    }

    #[test]
    fn preflight_is_empty_204_for_any_path() {
        let server = server();
        for path in ["/", "/controllers", "/pilots/online", "/anything"] {
            let reply = server.handle("OPTIONS", path, "");
            assert_eq!(reply.status, 204);
            assert!(reply.body_json().is_none());
        }
    }

    #[test]
    fn unknown_routes_are_404_envelopes() {
        let server = server();
        for (method, path) in [
            ("GET", "/planes"),
            ("PUT", "/controllers/123"),
            ("POST", "/controllers/123"),
            ("GET", "/controllers/123/extra"),
            ("DELETE", "/controllers"),
        ] {
            let reply = server.handle(method, path, "");
            assert_eq!(reply.status, 404, "{method} {path}");
            assert_eq!(body_value(&reply)["success"], json!(false));
        }
    }

    #[test]
    fn malformed_body_is_400() {
        let server = server();
        let reply = server.handle("POST", "/controllers/online", "{not json");
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn oversized_body_is_400() {
        let config = ServerConfig::default().with_max_body_bytes(16);
        let server = TrackerServer::new(config, Arc::new(MemoryStore::new()));
        let reply = server.handle("POST", "/controllers/online", &"x".repeat(32));
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn conflict_maps_to_409() {
        let server = server();
        server.handle(
            "POST",
            "/controllers/online",
            r#"{"cid": "123", "callsign": "UAL1"}"#,
        );
        let reply = server.handle(
            "POST",
            "/controllers/online",
            r#"{"cid": "456", "callsign": "UAL1"}"#,
        );
        assert_eq!(reply.status, 409);
    }

    /// Store double that fails every call.
    struct DownStore;

    impl KvStore for DownStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::unavailable("connection refused"))
        }
        fn put(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::unavailable("connection refused"))
        }
        fn delete(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::unavailable("connection refused"))
        }
        fn keys_with_prefix(&self, _prefix: &str) -> StoreResult<Vec<String>> {
            Err(StoreError::unavailable("connection refused"))
        }
    }

    #[test]
    fn storage_failure_maps_to_500_with_details() {
        let server = TrackerServer::new(ServerConfig::default(), Arc::new(DownStore));
        let reply = server.handle("GET", "/controllers", "");
        assert_eq!(reply.status, 500);
        let value = body_value(&reply);
        assert_eq!(value["success"], json!(false));
        assert!(value["details"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let server = server();
        let reply = server.handle("GET", "/controllers/", "");
        assert_eq!(reply.status, 200);
    }
}
