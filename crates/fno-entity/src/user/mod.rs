//! User domain entities and value rules.

pub mod iin;
pub mod model;
pub mod name;
pub mod role;

pub use iin::is_valid_iin;
pub use model::{NewUser, User, UserChanges, UserCredentials};
pub use name::format_full_name;
pub use role::Role;
