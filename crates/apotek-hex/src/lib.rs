//! apotek-hex: pharmacy service core (application services) and inbound HTTP
//! adapters, one router per service.

pub mod config;
pub mod errors;

pub mod application;

pub use apotek_types::{domain, ports, Envelope};

pub mod inbound; // HTTP adapter (server + per-service routers)
