//! Branch domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use branchdesk_core::BranchId;

/// A branch of the organization.
///
/// Admin management only ever checks that a branch exists; the name is kept
/// for operators listing branches from the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Branch {
    /// Unique branch ID.
    pub id: BranchId,
    /// Display name.
    pub name: String,
    /// When the branch was created.
    pub created_at: DateTime<Utc>,
}
