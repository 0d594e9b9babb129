//! Branch administrator domain types.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use branchdesk_core::{AdminId, BranchId, ContactNumber, Email, PasswordHash};

/// A branch administrator (domain type).
///
/// Serializes with snake_case field names (`email`, `number`, `created_at`).
/// Two fields differ from their Rust names: the branch is rendered as a list
/// under `branch` (`[id]`, or `[]` when unassigned) and the activation flag
/// as `activate`. The password hash is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    /// Unique admin ID, assigned by the store.
    pub id: AdminId,
    /// Display name.
    pub name: String,
    /// Login email, unique across admins.
    pub email: Email,
    /// Contact number, unique across admins.
    pub number: ContactNumber,
    /// Salted password hash.
    #[serde(skip)]
    pub password_hash: PasswordHash,
    /// The single branch this admin manages.
    #[serde(rename = "branch", serialize_with = "serialize_branch")]
    pub branch_id: Option<BranchId>,
    /// Whether the admin may log in.
    #[serde(rename = "activate")]
    pub active: bool,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
    /// When the admin was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Whether this admin is assigned to `branch`.
    #[must_use]
    pub fn belongs_to(&self, branch: BranchId) -> bool {
        self.branch_id == Some(branch)
    }
}

fn serialize_branch<S: Serializer>(
    branch: &Option<BranchId>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(branch.iter())
}

/// Fields for inserting a new admin.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: Email,
    pub number: ContactNumber,
    pub password_hash: PasswordHash,
    pub branch_id: BranchId,
    pub active: bool,
}

/// Full replacement of an admin's editable fields.
///
/// `active: None` leaves the activation flag as it is.
#[derive(Debug, Clone)]
pub struct AdminChanges {
    pub name: String,
    pub email: Email,
    pub number: ContactNumber,
    pub password_hash: PasswordHash,
    pub branch_id: BranchId,
    pub active: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample(branch_id: Option<BranchId>) -> Admin {
        Admin {
            id: AdminId::new(1),
            name: "Ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            number: ContactNumber::parse("5550100").unwrap(),
            password_hash: PasswordHash::new("$argon2id$stub".to_owned()),
            branch_id,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_serializes_branch_as_list_and_hides_hash() {
        let json = serde_json::to_value(sample(Some(BranchId::new(4)))).unwrap();
        assert_eq!(json["branch"], serde_json::json!([4]));
        assert_eq!(json["activate"], serde_json::json!(true));
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(sample(Some(BranchId::new(4)))).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "activate",
                "branch",
                "created_at",
                "email",
                "id",
                "name",
                "number",
                "updated_at"
            ]
        );
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["number"], "5550100");
    }

    #[test]
    fn test_unassigned_branch_is_empty_list() {
        let json = serde_json::to_value(sample(None)).unwrap();
        assert_eq!(json["branch"], serde_json::json!([]));
    }

    #[test]
    fn test_belongs_to() {
        let admin = sample(Some(BranchId::new(4)));
        assert!(admin.belongs_to(BranchId::new(4)));
        assert!(!admin.belongs_to(BranchId::new(5)));
        assert!(!sample(None).belongs_to(BranchId::new(4)));
    }
}
