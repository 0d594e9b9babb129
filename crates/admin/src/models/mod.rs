//! Domain models for branch administration.

pub mod admin;
pub mod branch;

pub use admin::{Admin, AdminChanges, NewAdmin};
pub use branch::Branch;
