//! Token issuance, validation and password hashing.

mod claims;
mod jwt;
mod password;

pub use claims::Claims;
pub use jwt::JwtAuthority;
pub use password::{hash_password, verify_password};
