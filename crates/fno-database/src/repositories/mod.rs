//! PostgreSQL-backed repositories.

pub mod role;
pub mod user;

pub use role::RoleRepository;
pub use user::PgUserStore;

/// Maps a sqlx error to a [`crate::StoreError`], recognising unique
/// violations by their constraint name.
pub(crate) fn map_write_error(err: sqlx::Error, context: &'static str) -> crate::StoreError {
    use fno_core::error::{AppError, ErrorKind};

    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            let fields = db_err
                .constraint()
                .map(constraint_fields)
                .unwrap_or_default();
            return crate::StoreError::UniqueViolation { fields };
        }
    }
    crate::StoreError::Backend(AppError::with_source(ErrorKind::Database, context, err))
}

/// Extracts the column name from a `<table>_<column>_key` constraint.
/// Falls back to the raw name when it does not follow that shape.
pub(crate) fn constraint_fields(constraint: &str) -> Vec<String> {
    let field = constraint
        .strip_suffix("_key")
        .and_then(|stem| stem.rsplit_once('_'))
        .map(|(_, column)| column)
        .filter(|column| !column.is_empty())
        .unwrap_or(constraint);
    vec![field.to_string()]
}
