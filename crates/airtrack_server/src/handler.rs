//! Request handlers for tracker operations.

use crate::error::{ServerError, ServerResult};
use crate::response::{ApiReply, ApiResponse};
use airtrack_core::{Callsign, Cid, CoreError, EntityKind, EntityRecord, Roster};
use airtrack_store::KvStore;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// Body of a set-online request.
///
/// `cid` may arrive as a JSON number or string; everything beyond the two
/// known fields is carried opaquely as kind-specific attributes.
#[derive(Debug, Deserialize)]
struct OnlineRequest {
    cid: Value,
    callsign: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

/// Body of a set-offline request.
#[derive(Debug, Deserialize)]
struct OfflineRequest {
    cid: Value,
}

/// Handler for tracker requests.
///
/// Owns one [`Roster`] per entity kind over the shared store and turns
/// every operation outcome into an [`ApiReply`] (status code plus JSON
/// envelope). No error escapes as a panic; storage failures become 500
/// envelopes with the underlying detail attached.
pub struct RequestHandler {
    controllers: Roster,
    pilots: Roster,
}

impl RequestHandler {
    /// Creates a handler with both rosters over the given store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            controllers: Roster::new(EntityKind::Controller, Arc::clone(&store)),
            pilots: Roster::new(EntityKind::Pilot, store),
        }
    }

    /// Creates a handler from pre-built rosters (tests inject clocks).
    pub fn with_rosters(controllers: Roster, pilots: Roster) -> Self {
        Self {
            controllers,
            pilots,
        }
    }

    fn roster(&self, kind: EntityKind) -> &Roster {
        match kind {
            EntityKind::Controller => &self.controllers,
            EntityKind::Pilot => &self.pilots,
        }
    }

    /// `GET /` - API information.
    #[must_use]
    pub fn api_info(&self) -> ApiReply {
        ApiReply::ok(ApiResponse::ok(json!({
            "name": "Airtrack API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Online/offline presence tracking for aviation network participants",
            "endpoints": {
                "GET /": "API information",
                "GET /{controllers|pilots}": "List online entities",
                "GET /{controllers|pilots}/:cid": "Get entity by CID",
                "GET /{controllers|pilots}/callsign/:callsign": "Get entity by callsign",
                "POST /{controllers|pilots}/online": "Set entity online",
                "POST /{controllers|pilots}/offline": "Set entity offline",
                "DELETE /{controllers|pilots}/:cid": "Remove entity from tracking",
            },
        })))
    }

    /// Lists all online entities of a kind, most recently online first.
    #[must_use]
    pub fn list_online(&self, kind: EntityKind) -> ApiReply {
        self.reply(self.try_list_online(kind))
    }

    /// Fetches an entity by CID.
    #[must_use]
    pub fn get_by_cid(&self, kind: EntityKind, raw_cid: &str) -> ApiReply {
        self.reply(self.try_get_by_cid(kind, raw_cid))
    }

    /// Fetches the online entity holding a callsign.
    #[must_use]
    pub fn get_by_callsign(&self, kind: EntityKind, raw_callsign: &str) -> ApiReply {
        self.reply(self.try_get_by_callsign(kind, raw_callsign))
    }

    /// Marks an entity online from a JSON request body.
    #[must_use]
    pub fn set_online(&self, kind: EntityKind, body: &str) -> ApiReply {
        self.reply(self.try_set_online(kind, body))
    }

    /// Marks an entity offline from a JSON request body.
    #[must_use]
    pub fn set_offline(&self, kind: EntityKind, body: &str) -> ApiReply {
        self.reply(self.try_set_offline(kind, body))
    }

    /// Removes an entity permanently.
    #[must_use]
    pub fn remove(&self, kind: EntityKind, raw_cid: &str) -> ApiReply {
        self.reply(self.try_remove(kind, raw_cid))
    }

    fn try_list_online(&self, kind: EntityKind) -> ServerResult<ApiResponse> {
        let records = self.roster(kind).list_online()?;
        let items = records
            .iter()
            .map(record_value)
            .collect::<ServerResult<Vec<_>>>()?;
        Ok(ApiResponse::list(items))
    }

    fn try_get_by_cid(&self, kind: EntityKind, raw_cid: &str) -> ServerResult<ApiResponse> {
        let cid = Cid::parse(raw_cid)?;
        match self.roster(kind).get(&cid)? {
            Some(record) => Ok(ApiResponse::ok(record_value(&record)?)),
            None => Err(not_found(kind, &cid)),
        }
    }

    fn try_get_by_callsign(
        &self,
        kind: EntityKind,
        raw_callsign: &str,
    ) -> ServerResult<ApiResponse> {
        match self.roster(kind).get_by_callsign(raw_callsign)? {
            Some(record) => Ok(ApiResponse::ok(record_value(&record)?)),
            None => Err(ServerError::from(CoreError::not_found(format!(
                "no online {kind} with callsign {}",
                raw_callsign.to_uppercase()
            )))),
        }
    }

    fn try_set_online(&self, kind: EntityKind, body: &str) -> ServerResult<ApiResponse> {
        let request: OnlineRequest = parse_body(body)?;
        let cid = cid_from_value(&request.cid)?;
        let callsign = Callsign::parse(&request.callsign)?;

        let record = self
            .roster(kind)
            .set_online(&cid, &callsign, request.attributes)?;
        Ok(ApiResponse::ok_with_message(
            record_value(&record)?,
            format!("{kind} set as online"),
        ))
    }

    fn try_set_offline(&self, kind: EntityKind, body: &str) -> ServerResult<ApiResponse> {
        let request: OfflineRequest = parse_body(body)?;
        let cid = cid_from_value(&request.cid)?;

        let record = self.roster(kind).set_offline(&cid)?;
        Ok(ApiResponse::ok_with_message(
            record_value(&record)?,
            format!("{kind} set as offline"),
        ))
    }

    fn try_remove(&self, kind: EntityKind, raw_cid: &str) -> ServerResult<ApiResponse> {
        let cid = Cid::parse(raw_cid)?;
        self.roster(kind).remove(&cid)?;
        Ok(ApiResponse::ok_message(format!(
            "{kind} removed from tracking"
        )))
    }

    fn reply(&self, result: ServerResult<ApiResponse>) -> ApiReply {
        match result {
            Ok(body) => ApiReply::ok(body),
            Err(e) if e.is_server_error() => {
                error!(error = %e, "request failed");
                ApiReply::from_error(&e)
            }
            Err(e) => {
                debug!(error = %e, "request rejected");
                ApiReply::from_error(&e)
            }
        }
    }
}

impl std::fmt::Debug for RequestHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHandler").finish_non_exhaustive()
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> ServerResult<T> {
    serde_json::from_str(body).map_err(|e| ServerError::InvalidRequest(e.to_string()))
}

/// Accepts a CID sent as either a JSON string or an integer.
fn cid_from_value(value: &Value) -> ServerResult<Cid> {
    match value {
        Value::String(s) => Ok(Cid::parse(s)?),
        Value::Number(n) => Ok(Cid::parse(&n.to_string())?),
        other => Err(ServerError::InvalidRequest(format!(
            "cid must be a number or string, got {other}"
        ))),
    }
}

fn record_value(record: &EntityRecord) -> ServerResult<Value> {
    serde_json::to_value(record)
        .map_err(|e| CoreError::malformed(record.cid.as_str(), e.to_string()).into())
}

fn not_found(kind: EntityKind, cid: &Cid) -> ServerError {
    CoreError::not_found(format!("{kind} {cid} not found")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtrack_store::MemoryStore;

    fn handler() -> RequestHandler {
        RequestHandler::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn online_accepts_numeric_cid() {
        let handler = handler();
        let reply = handler.set_online(
            EntityKind::Controller,
            r#"{"cid": 123, "callsign": "UAL1"}"#,
        );
        assert_eq!(reply.status, 200);

        let reply = handler.get_by_cid(EntityKind::Controller, "123");
        assert_eq!(reply.status, 200);
    }

    #[test]
    fn online_carries_extra_fields_as_attributes() {
        let handler = handler();
        let reply = handler.set_online(
            EntityKind::Pilot,
            r#"{"cid": "456", "callsign": "dal9", "aircraft": "B738", "route": "KSFO KLAX"}"#,
        );
        assert_eq!(reply.status, 200);

        let body = reply.body.unwrap();
        let data = body.data.unwrap();
        assert_eq!(data["aircraft"], json!("B738"));
        assert_eq!(data["route"], json!("KSFO KLAX"));
        assert_eq!(data["callsign"], json!("DAL9"));
    }

    #[test]
    fn online_missing_fields_is_400() {
        let handler = handler();
        for body in [r#"{}"#, r#"{"cid": "123"}"#, r#"{"callsign": "UAL1"}"#] {
            let reply = handler.set_online(EntityKind::Controller, body);
            assert_eq!(reply.status, 400, "body {body} should be rejected");
        }
    }

    #[test]
    fn online_bad_cid_type_is_400() {
        let handler = handler();
        let reply = handler.set_online(
            EntityKind::Controller,
            r#"{"cid": true, "callsign": "UAL1"}"#,
        );
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn conflict_is_409_and_leaves_loser_absent() {
        let handler = handler();
        handler.set_online(
            EntityKind::Controller,
            r#"{"cid": "123", "callsign": "UAL1"}"#,
        );
        let reply = handler.set_online(
            EntityKind::Controller,
            r#"{"cid": "456", "callsign": "ual1"}"#,
        );
        assert_eq!(reply.status, 409);
        assert_eq!(handler.get_by_cid(EntityKind::Controller, "456").status, 404);
    }

    #[test]
    fn offline_then_remove_clears_both_lookups() {
        let handler = handler();
        handler.set_online(
            EntityKind::Controller,
            r#"{"cid": "123", "callsign": "UAL1"}"#,
        );
        assert_eq!(
            handler
                .set_offline(EntityKind::Controller, r#"{"cid": "123"}"#)
                .status,
            200
        );
        assert_eq!(handler.remove(EntityKind::Controller, "123").status, 200);
        assert_eq!(handler.get_by_cid(EntityKind::Controller, "123").status, 404);
        assert_eq!(
            handler.get_by_callsign(EntityKind::Controller, "UAL1").status,
            404
        );
    }

    #[test]
    fn offline_unknown_cid_is_404() {
        let handler = handler();
        let reply = handler.set_offline(EntityKind::Controller, r#"{"cid": "999"}"#);
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn never_seen_cid_is_404_not_500() {
        let handler = handler();
        let reply = handler.get_by_cid(EntityKind::Controller, "999");
        assert_eq!(reply.status, 404);
        let body = reply.body.unwrap();
        assert!(!body.success);
        assert!(body.error.unwrap().contains("999"));
    }

    #[test]
    fn invalid_cid_is_400() {
        let handler = handler();
        assert_eq!(handler.get_by_cid(EntityKind::Controller, "12a").status, 400);
        assert_eq!(handler.remove(EntityKind::Controller, "007").status, 400);
    }

    #[test]
    fn list_reports_count() {
        let handler = handler();
        handler.set_online(
            EntityKind::Controller,
            r#"{"cid": "1", "callsign": "AAL1"}"#,
        );
        handler.set_online(
            EntityKind::Controller,
            r#"{"cid": "2", "callsign": "BAW2"}"#,
        );

        let reply = handler.list_online(EntityKind::Controller);
        let body = reply.body.unwrap();
        assert_eq!(body.count, Some(2));
    }

    #[test]
    fn pilot_without_aircraft_is_400() {
        let handler = handler();
        let reply = handler.set_online(EntityKind::Pilot, r#"{"cid": "1", "callsign": "DAL9"}"#);
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn api_info_lists_endpoints() {
        let handler = handler();
        let reply = handler.api_info();
        let data = reply.body.unwrap().data.unwrap();
        assert!(data["endpoints"].as_object().unwrap().len() >= 6);
    }
}
