//! Authentication helpers - JWT issuance and password hashing

mod jwt;
mod password;

pub use jwt::{Claims, JwtService};
pub use password::{hash_password, validate_password_strength, verify_password};
