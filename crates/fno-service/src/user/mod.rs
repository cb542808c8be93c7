//! User lifecycle management.

pub mod input;
pub mod service;
pub mod validation;
pub mod view;

pub use input::{CreateUser, RegisterUser, UpdateUser};
pub use service::UserService;
pub use view::UserView;
