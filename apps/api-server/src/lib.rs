//! # Postboard API Server
//!
//! HTTP surface for the post store, built on Actix-web.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
