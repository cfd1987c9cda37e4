//! One router per service. Each takes its application service and returns a
//! stateless `Router` ready for [`HttpServer`].

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod server;
pub mod transactions;
pub mod users;

pub use server::{HttpServer, HttpServerConfig};
