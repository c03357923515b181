//! HTTP API: the group-scoped cookbook controller and its wiring.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
