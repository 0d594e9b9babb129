//! Business logic services for branch administration.
//!
//! # Services
//!
//! - `admins` - Admin account management and login
//! - `password` - Argon2id password hashing
//! - `token` - JWT bearer token issuance

pub mod admins;
pub mod password;
pub mod token;

pub use admins::{AdminInput, AdminPolicy, AdminService, AdminServiceError, ErrorKind, LoginOutcome};
pub use password::PasswordError;
pub use token::{Claims, JwtTokenIssuer, TokenError, TokenIssuer, TokenSubject};
