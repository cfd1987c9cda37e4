//! apotek-types: domain model and repository ports shared by every service.

pub mod domain;
pub mod envelope;
pub mod ports;

pub use envelope::Envelope;
