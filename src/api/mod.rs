//! HTTP API layer: request handlers, middleware, extractors and DTOs.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
mod doc;

pub use doc::ApiDoc;
