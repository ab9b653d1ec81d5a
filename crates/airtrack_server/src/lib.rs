//! # Airtrack Server
//!
//! HTTP boundary for the Airtrack presence tracker.
//!
//! This crate provides:
//! - Method + path routing for the tracker API
//! - The JSON response envelope (`{success, data|error, timestamp}`)
//! - Error-to-status-code mapping
//! - The fixed permissive CORS policy and preflight handling
//!
//! # Architecture
//!
//! HTTP framing itself (sockets, TLS, header parsing) is left to the
//! embedding application; this crate turns an already-parsed request
//! (method, path, body) into a status code, headers, and a JSON body:
//!
//! ```rust
//! use airtrack_server::{ServerConfig, TrackerServer};
//! use airtrack_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let server = TrackerServer::new(ServerConfig::default(), Arc::new(MemoryStore::new()));
//! let reply = server.handle(
//!     "POST",
//!     "/controllers/online",
//!     r#"{"cid":"123","callsign":"UAL1"}"#,
//! );
//! assert_eq!(reply.status, 200);
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/` | API information |
//! | GET | `/controllers` | List online controllers |
//! | GET | `/controllers/:cid` | Get controller by CID |
//! | GET | `/controllers/callsign/:callsign` | Get controller by callsign |
//! | POST | `/controllers/online` | Set controller online |
//! | POST | `/controllers/offline` | Set controller offline |
//! | DELETE | `/controllers/:cid` | Remove controller |
//! | OPTIONS | any | CORS preflight |
//!
//! The same family exists under `/pilots`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod handler;
mod response;
mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::RequestHandler;
pub use response::{cors_headers, ApiReply, ApiResponse};
pub use server::TrackerServer;
