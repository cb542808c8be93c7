//! Workspace-wide error type.
//!
//! Every layer returns [`AppError`]. The kind alone decides how the HTTP
//! layer renders it, so services never choose status codes.

use std::fmt;

use thiserror::Error;

/// What went wrong, independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A user or role does not exist.
    NotFound,
    /// Bad credentials, an invalid or expired token, or an inactive account.
    Authentication,
    /// Authenticated, but not allowed to perform the action.
    Authorization,
    /// Input rejected before touching the store.
    Validation,
    /// A unique field (email, IIN) is already taken.
    Conflict,
    /// Unexpected failure inside the process.
    Internal,
    /// The store failed or is unreachable.
    Database,
    /// The deployment is misconfigured (missing secret, unseeded roles).
    Configuration,
}

impl ErrorKind {
    /// Code carried in the `error` field of API error bodies.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Authentication => "UNAUTHORIZED",
            Self::Authorization => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Internal | Self::Database => "INTERNAL_ERROR",
        }
    }

    /// Whether the message may be returned to the caller as is.
    /// Everything else is logged and replaced with a generic message.
    pub const fn is_client_facing(self) -> bool {
        matches!(
            self,
            Self::Validation
                | Self::Authentication
                | Self::Authorization
                | Self::NotFound
                | Self::Conflict
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The error returned by every fallible operation in the workspace.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Category, used for rendering.
    pub kind: ErrorKind,
    /// Message; shown to clients only for client-facing kinds.
    pub message: String,
    /// Underlying cause, for logs.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a lower-level failure, keeping it for logs.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` if this error has the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

macro_rules! kind_constructors {
    ($($name:ident => $kind:ident),* $(,)?) => {
        impl AppError {
            $(
                #[doc = concat!("Shorthand for an [`ErrorKind::", stringify!($kind), "`] error.")]
                pub fn $name(message: impl Into<String>) -> Self {
                    Self::new(ErrorKind::$kind, message)
                }
            )*
        }
    };
}

kind_constructors! {
    not_found => NotFound,
    authentication => Authentication,
    authorization => Authorization,
    validation => Validation,
    conflict => Conflict,
    internal => Internal,
    database => Database,
    configuration => Configuration,
}

/// The source is not cloneable; clones keep kind and message only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, format!("Invalid configuration: {err}"), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::conflict("Email already exists");
        assert_eq!(err.to_string(), "Conflict: Email already exists");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Database, "query failed", io);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert!(cloned.is(ErrorKind::Database));
    }

    #[test]
    fn test_server_side_kinds_share_a_code() {
        for kind in [ErrorKind::Internal, ErrorKind::Database] {
            assert_eq!(kind.code(), "INTERNAL_ERROR");
            assert!(!kind.is_client_facing());
        }
        assert!(ErrorKind::Conflict.is_client_facing());
        assert!(!ErrorKind::Configuration.is_client_facing());
    }
}
