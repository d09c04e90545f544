//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new back-office user
//! twill user create -u lan.pham -n "Lan Pham" -e lan@twill.example -r manager
//! ```
//!
//! # Environment Variables
//!
//! - `TWILL_API_BASE_URL` - Base URL of the retail backend API
//! - `TWILL_ADMIN_USERNAME` / `TWILL_ADMIN_PASSWORD` - Operator credentials

use uuid::Uuid;

use twill_admin::api::types::NewUser;
use twill_core::{Email, UserRole};

use super::{CliError, Operator};

/// Create a new back-office user.
///
/// When no password is given, a random one is generated and logged once.
///
/// # Errors
///
/// Returns an error if the inputs are invalid or the backend rejects the
/// request.
pub async fn create(
    username: &str,
    name: &str,
    email: &str,
    role: &str,
    password: Option<String>,
) -> Result<i32, CliError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| CliError::InvalidRole(role.to_owned()))?;

    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    if username.trim().is_empty() {
        return Err(CliError::InvalidInput("username is required".to_owned()));
    }

    let (password, generated) = match password {
        Some(p) => (p, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    };

    let operator = Operator::connect().await?;

    tracing::info!("Creating user: {} ({})", username, role);

    let created = operator
        .authorized()
        .create_user(&NewUser {
            username: username.to_owned(),
            name: name.to_owned(),
            email,
            password: password.clone(),
            role,
        })
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}, Role: {}",
        created.id,
        created.username,
        created.role
    );
    if generated {
        tracing::warn!(
            "Generated initial password (share securely, then have the user change it): {}",
            password
        );
    }

    Ok(created.id.as_i32())
}
