//! Admin account handlers.
//!
//! Request bodies accept lowercase keys as well as the capitalized
//! `Email`/`Number`/`Password` keys older clients send.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use branchdesk_core::{AdminId, BranchId, ContactNumber, Email};

use super::ApiResponse;
use crate::error::AppError;
use crate::models::Admin;
use crate::services::AdminInput;
use crate::state::AppState;

/// Body for creating or replacing an admin.
#[derive(Default, Deserialize)]
pub struct AdminForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Number")]
    pub number: Option<String>,
    #[serde(default, alias = "Password")]
    pub password: Option<String>,
    #[serde(default, alias = "branch_id")]
    pub branch: Option<BranchId>,
}

impl std::fmt::Debug for AdminForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("number", &self.number)
            .field("password", &"[REDACTED]")
            .field("branch", &self.branch)
            .finish()
    }
}

impl AdminForm {
    /// Check every field, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the offending field.
    pub fn validate(self) -> Result<AdminInput, AppError> {
        let name = required("name", self.name)?;
        let email = parse_email(self.email)?;
        let number = ContactNumber::parse(&required("number", self.number)?)
            .map_err(|e| AppError::Validation(format!("invalid number: {e}")))?;
        let password = required_password(self.password)?;
        let branch_id = self
            .branch
            .ok_or_else(|| AppError::Validation("branch is required".to_string()))?;

        Ok(AdminInput {
            name,
            email,
            number,
            password,
            branch_id,
        })
    }
}

/// Body for logging in.
#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Password")]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns `AppError::Validation` if email or password is missing or malformed.
    pub fn validate(self) -> Result<(Email, SecretString), AppError> {
        let email = parse_email(self.email)?;
        let password = required_password(self.password)?;
        Ok((email, password))
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_owned()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

fn parse_email(value: Option<String>) -> Result<Email, AppError> {
    Email::parse(&required("email", value)?)
        .map_err(|e| AppError::Validation(format!("invalid email: {e}")))
}

// Passwords are not trimmed.
fn required_password(value: Option<String>) -> Result<SecretString, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(SecretString::from(v)),
        _ => Err(AppError::Validation("password is required".to_string())),
    }
}

/// New activation state returned by the toggle endpoint.
#[derive(Debug, Serialize)]
pub struct ActivationState {
    pub activate: bool,
}

/// `POST /admins`
#[instrument(skip(state, body))]
pub async fn create_admin(
    State(state): State<AppState>,
    body: Result<Json<AdminForm>, JsonRejection>,
) -> Result<ApiResponse<Admin>, AppError> {
    let Json(form) = body?;
    let input = form.validate()?;

    let admin = state.admin_service().create_admin(input).await?;
    Ok(ApiResponse::ok("Admin Created successfully", admin))
}

/// `PUT /admins/{id}`
#[instrument(skip(state, id, body))]
pub async fn update_admin(
    State(state): State<AppState>,
    id: Result<Path<AdminId>, PathRejection>,
    body: Result<Json<AdminForm>, JsonRejection>,
) -> Result<ApiResponse<Admin>, AppError> {
    let Path(id) = id?;
    let Json(form) = body?;
    let input = form.validate()?;

    let admin = state.admin_service().update_admin(id, input).await?;
    Ok(ApiResponse::ok("Admin Updated successfully", admin))
}

/// `PATCH /admins/{admin_id}/branch/{branch_id}`
#[instrument(skip(state, ids))]
pub async fn update_admin_branch(
    State(state): State<AppState>,
    ids: Result<Path<(AdminId, BranchId)>, PathRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let Path((admin_id, branch_id)) = ids?;

    state
        .admin_service()
        .update_admin_branch(admin_id, branch_id)
        .await?;
    Ok(ApiResponse::ack("Branch Updated successfully"))
}

/// `PATCH /admins/{id}/toggle-active`
#[instrument(skip(state, id))]
pub async fn toggle_active_admin(
    State(state): State<AppState>,
    id: Result<Path<AdminId>, PathRejection>,
) -> Result<ApiResponse<ActivationState>, AppError> {
    let Path(id) = id?;

    let activate = state.admin_service().toggle_active_admin(id).await?;
    Ok(ApiResponse::ok(
        "Admin successfully activated/deactivated",
        ActivationState { activate },
    ))
}

/// `GET /branches/{branch_id}/admins`
#[instrument(skip(state, branch_id))]
pub async fn get_all_admin(
    State(state): State<AppState>,
    branch_id: Result<Path<BranchId>, PathRejection>,
) -> Result<ApiResponse<Vec<Admin>>, AppError> {
    let Path(branch_id) = branch_id?;

    let admins = state.admin_service().get_all_admin(branch_id).await?;
    Ok(ApiResponse::ok("Admins fetched successfully", admins))
}

/// `GET /admins/{id}`
#[instrument(skip(state, id))]
pub async fn get_single_admin(
    State(state): State<AppState>,
    id: Result<Path<AdminId>, PathRejection>,
) -> Result<ApiResponse<Admin>, AppError> {
    let Path(id) = id?;

    let admin = state.admin_service().get_single_admin(id).await?;
    Ok(ApiResponse::ok("Admin fetched successfully", admin))
}

/// `POST /admins/login`
#[instrument(skip(state, body))]
pub async fn login_admin(
    State(state): State<AppState>,
    body: Result<Json<LoginForm>, JsonRejection>,
) -> Result<ApiResponse<Admin>, AppError> {
    let Json(form) = body?;
    let (email, password) = form.validate()?;

    let outcome = state.admin_service().login_admin(&email, &password).await?;
    Ok(ApiResponse::ok("Login successful", outcome.admin).with_token(outcome.token))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::services::ErrorKind;

    fn form() -> AdminForm {
        serde_json::from_value(serde_json::json!({
            "name": "  Ada  ",
            "email": "ada@example.com",
            "number": "+1 555-0100",
            "password": " pass word ",
            "branch": 3,
        }))
        .unwrap()
    }

    fn validation_message(result: Result<AdminInput, AppError>) -> String {
        match result {
            Err(AppError::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_form_becomes_input() {
        let input = form().validate().unwrap();
        assert_eq!(input.name, "Ada");
        assert_eq!(input.email.as_str(), "ada@example.com");
        assert_eq!(input.number.as_str(), "+1 555-0100");
        assert_eq!(input.password.expose_secret(), " pass word ");
        assert_eq!(input.branch_id, BranchId::new(3));
    }

    #[test]
    fn test_legacy_capitalized_keys() {
        let form: AdminForm = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "Email": "ada@example.com",
            "Number": "5550100",
            "Password": "pw",
            "branch": 1,
        }))
        .unwrap();
        assert!(form.validate().is_ok());

        let login: LoginForm = serde_json::from_value(serde_json::json!({
            "Email": "ada@example.com",
            "Password": "pw",
        }))
        .unwrap();
        let (email, _) = login.validate().unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_first_failing_field_is_reported() {
        let mut missing_everything = AdminForm::default();
        missing_everything.number = Some("bad".to_string());
        assert_eq!(
            validation_message(missing_everything.validate()),
            "name is required"
        );

        let mut blank_name = form();
        blank_name.name = Some("   ".to_string());
        assert_eq!(validation_message(blank_name.validate()), "name is required");

        let mut no_branch = form();
        no_branch.branch = None;
        assert_eq!(validation_message(no_branch.validate()), "branch is required");

        let mut empty_password = form();
        empty_password.password = Some(String::new());
        assert_eq!(
            validation_message(empty_password.validate()),
            "password is required"
        );
    }

    #[test]
    fn test_malformed_fields_are_validation_failures() {
        let mut bad_email = form();
        bad_email.email = Some("not-an-email".to_string());
        let err = bad_email.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.to_string().starts_with("invalid email"));

        let mut bad_number = form();
        bad_number.number = Some("12".to_string());
        assert!(validation_message(bad_number.validate()).starts_with("invalid number"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let err = LoginForm {
            email: Some("ada@example.com".to_string()),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "password is required");
    }

    #[test]
    fn test_debug_redacts_password() {
        let output = format!("{:?}", form());
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("pass word"));
    }
}
