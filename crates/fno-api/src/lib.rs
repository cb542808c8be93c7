//! # fno-api
//!
//! HTTP API for the FNO platform built on Axum.
//!
//! Provides the user and auth endpoints, the bearer-token extractor,
//! CORS and request logging middleware, and the mapping from
//! [`fno_core::AppError`] to JSON error responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, connect_store, serve};
pub use state::AppState;
