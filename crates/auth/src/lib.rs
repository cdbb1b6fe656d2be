//! `stockroom-auth` — authentication boundary (credentials, tokens, identity).
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod identity;
pub mod password;
pub mod token;
pub mod user;

pub use claims::Claims;
pub use identity::Identity;
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{TokenError, TokenService};
pub use user::User;
