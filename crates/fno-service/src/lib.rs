//! # fno-service
//!
//! Business logic for the FNO platform: the user lifecycle (registration,
//! admin creation, lookup, partial update, soft delete) and login.
//!
//! Services take plain input structs and return view types that carry no
//! password hash. Authorization decisions are made by the caller through
//! [`fno_auth::AccessGate`] before a service method runs.

pub mod auth;
pub mod user;

pub use auth::{AuthService, LoginResult};
pub use user::{CreateUser, RegisterUser, UpdateUser, UserService, UserView};
