//! Access token issuance, decoding, and identity resolution.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod verifier;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use verifier::TokenVerifier;

/// The only message an invalid bearer token ever produces.
pub const INVALID_TOKEN: &str = "Invalid or expired token";
