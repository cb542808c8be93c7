//! # fno-entity
//!
//! Domain entity models for the FNO platform. Every struct in this crate
//! is either a stored record projection or a domain value object. The
//! read projections are split so that only [`user::UserCredentials`]
//! carries a password hash; [`user::User`] structurally cannot.

pub mod user;
