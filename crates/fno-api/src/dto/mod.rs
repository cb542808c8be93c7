//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::{CreateUserRequest, LoginRequest, RegisterUserRequest, UpdateUserRequest};
pub use response::HealthResponse;
