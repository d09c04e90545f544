//! CLI command implementations.
//!
//! Every command is a one-shot: sign in with the operator credentials from
//! the environment, perform one backend operation, exit.

pub mod report;
pub mod stock;
pub mod user;

use thiserror::Error;

use twill_admin::api::{AuthorizedClient, BackofficeClient, BackofficeError};
use twill_admin::config::{BackendConfig, ConfigError};

/// Errors that can occur during CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend call failure.
    #[error(transparent)]
    Backend(#[from] BackofficeError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, manager")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Invalid command input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem error while writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A signed-in operator session for one command.
pub struct Operator {
    client: BackofficeClient,
    token: String,
}

impl Operator {
    /// Sign in with `TWILL_ADMIN_USERNAME` / `TWILL_ADMIN_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or the backend rejects
    /// them.
    pub async fn connect() -> Result<Self, CliError> {
        dotenvy::dotenv().ok();

        let backend = BackendConfig::from_env("TWILL_API_BASE_URL")?;
        let username = std::env::var("TWILL_ADMIN_USERNAME")
            .map_err(|_| CliError::MissingEnvVar("TWILL_ADMIN_USERNAME"))?;
        let password = std::env::var("TWILL_ADMIN_PASSWORD")
            .map_err(|_| CliError::MissingEnvVar("TWILL_ADMIN_PASSWORD"))?;

        let client = BackofficeClient::new(&backend);
        let login = client.login(&username, &password).await?;

        tracing::info!(
            "Signed in as {} ({})",
            login.user.username,
            login.user.role
        );

        Ok(Self {
            client,
            token: login.token,
        })
    }

    /// The token-scoped client for this session.
    #[must_use]
    pub fn authorized(&self) -> AuthorizedClient<'_> {
        self.client.with_token(&self.token)
    }
}
