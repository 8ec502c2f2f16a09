//! Coverdesk HTTP Server - read-only API over the policy catalog
//!
//! Exposes policy search and the list of policy types as JSON, with
//! permissive CORS so browser front-ends on any origin can call it.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod server;
pub mod state;
pub mod tracing;

pub use api::{HealthResponse, PolicyQueryParams};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use server::serve;
pub use state::AppState;
