//! Core domain for the property listings backend.
//!
//! The crate owns everything below the HTTP server binary: configuration,
//! telemetry, the error taxonomy, the listing store and its filter/pagination
//! engine, and the cookie-based admin session flow. The deployable service in
//! `services/api` wires these pieces to a socket.

pub mod auth;
pub mod config;
pub mod error;
pub mod listings;
pub mod telemetry;
