//! Access control decisions.
//!
//! [`authorize`] is a pure predicate over an [`Identity`](crate::Identity);
//! [`AccessGate`] wraps it with the forbidden-error messages the API
//! returns.

pub mod gate;
pub mod policy;

pub use gate::AccessGate;
pub use policy::{AccessPolicy, authorize};
