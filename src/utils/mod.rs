//! Shared helpers: token signing, password hashing and request validation.

pub mod jwt;
pub mod password;
pub mod validate;
