//! Branchdesk admin library.
//!
//! Branch administrator accounts: creation, update, branch assignment,
//! activation and password login, exposed over a JSON HTTP API.
//!
//! The binary in `main.rs` wires these modules into an axum server; the
//! `branchdesk-cli` crate reuses the same service for operator commands.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
