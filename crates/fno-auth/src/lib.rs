//! # fno-auth
//!
//! Authentication and authorization for the FNO platform.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and verification
//! - `jwt`: access token issuance, decoding, and identity resolution
//! - `credentials`: email + password login check
//! - `identity`: the request-scoped caller representation
//! - `access`: role-required and admin-or-self decisions

pub mod access;
pub mod credentials;
pub mod identity;
pub mod jwt;
pub mod password;

pub use access::{AccessGate, AccessPolicy, authorize};
pub use credentials::CredentialVerifier;
pub use identity::{Identity, RoleView};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenVerifier};
pub use password::PasswordHasher;
