//! HTTP server module.
//!
//! The server binds a plain HTTP listener (TLS termination belongs to the
//! load balancer in front of this service) and shuts down gracefully on
//! SIGTERM/SIGINT, draining in-flight requests before exit.

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
