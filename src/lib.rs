//! Pulse - HTTP liveness probe service
//!
//! A minimal service that answers `GET /health` with a fixed JSON payload,
//! used by load balancers and orchestrators to confirm the process is
//! running and responsive. Exposed as a library so integration tests can
//! drive the router and server directly.

pub mod config;
pub mod http;
pub mod routes;
