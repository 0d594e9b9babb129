//! Core types for Branchdesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod credential;
pub mod email;
pub mod id;
pub mod role;

pub use contact::{ContactNumber, ContactNumberError};
pub use credential::PasswordHash;
pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
