//! Credential holder for the two Infrakit deployment variants.
//!
//! The single-tenant deployments use a password grant against a fixed token
//! endpoint; the multi-tenant deployment uses client credentials against a
//! per-tenant Keycloak realm resolved through OIDC discovery. Which flow a
//! client runs is decided here, at construction time, by which credential
//! shape is built.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::Path;

use crate::error::{InfrakitError, Result};
use crate::mode::Mode;

/// Environment/map key for the password-grant username.
pub const KEY_USERNAME: &str = "USERNAME";
/// Environment/map key for the password-grant password.
pub const KEY_PASSWORD: &str = "PASSWORD";
/// Environment/map key for the deployment mode selector.
pub const KEY_MODE: &str = "MODE";
/// Environment/map key for the multi-tenant customer id.
pub const KEY_CUSTOMER_ID: &str = "CUSTOMER_ID";
/// Environment/map key for the optional API subdomain override.
pub const KEY_SUBDOMAIN: &str = "SUBDOMAIN";
/// Environment/map key for the OAuth2 client id.
pub const KEY_CLIENT_ID: &str = "CLIENT_ID";
/// Environment/map key for the OAuth2 client secret.
pub const KEY_CLIENT_SECRET: &str = "CLIENT_SECRET";

const RECOGNIZED_KEYS: &[&str] = &[
    KEY_USERNAME,
    KEY_PASSWORD,
    KEY_MODE,
    KEY_CUSTOMER_ID,
    KEY_SUBDOMAIN,
    KEY_CLIENT_ID,
    KEY_CLIENT_SECRET,
];

/// Identity secrets plus the deployment selector.
///
/// Immutable once constructed. Required fields are validated up front so a
/// half-configured client cannot be built; every failure is an
/// [`InfrakitError::Configuration`] naming the missing field.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Password grant against a fixed-origin deployment selected by [`Mode`].
    Password {
        username: String,
        password: String,
        mode: Mode,
    },
    /// Client-credentials grant against a per-tenant realm.
    ClientCredentials {
        customer_id: String,
        /// Overrides the API host subdomain; defaults to the customer id.
        subdomain: Option<String>,
        client_id: String,
        client_secret: String,
    },
}

impl Credentials {
    /// Build password-grant credentials from explicit fields.
    ///
    /// # Errors
    ///
    /// Returns [`InfrakitError::Configuration`] if `username` or `password`
    /// is empty.
    pub fn password(username: &str, password: &str, mode: Mode) -> Result<Self> {
        require(KEY_USERNAME, username)?;
        require(KEY_PASSWORD, password)?;
        Ok(Credentials::Password {
            username: username.to_string(),
            password: password.to_string(),
            mode,
        })
    }

    /// Build client-credentials credentials from explicit fields.
    ///
    /// # Errors
    ///
    /// Returns [`InfrakitError::Configuration`] if any required field is
    /// empty.
    pub fn client_credentials(
        customer_id: &str,
        subdomain: Option<&str>,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self> {
        require(KEY_CUSTOMER_ID, customer_id)?;
        require(KEY_CLIENT_ID, client_id)?;
        require(KEY_CLIENT_SECRET, client_secret)?;
        Ok(Credentials::ClientCredentials {
            customer_id: customer_id.to_string(),
            subdomain: subdomain.map(str::to_string),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    /// Build credentials from a resolved key→value mapping.
    ///
    /// The client-credentials shape is selected when `CUSTOMER_ID`,
    /// `CLIENT_ID` and `CLIENT_SECRET` are all present; otherwise the
    /// password shape is expected. `MODE` defaults to `production`.
    ///
    /// # Errors
    ///
    /// Returns [`InfrakitError::Configuration`] when a required field for
    /// the selected shape is absent, or [`InfrakitError::InvalidMode`] for
    /// an unrecognized `MODE` value.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).map(String::as_str).filter(|v| !v.is_empty());

        if get(KEY_CUSTOMER_ID).is_some()
            && get(KEY_CLIENT_ID).is_some()
            && get(KEY_CLIENT_SECRET).is_some()
        {
            return Self::client_credentials(
                get(KEY_CUSTOMER_ID).unwrap_or_default(),
                get(KEY_SUBDOMAIN),
                get(KEY_CLIENT_ID).unwrap_or_default(),
                get(KEY_CLIENT_SECRET).unwrap_or_default(),
            );
        }

        let username = get(KEY_USERNAME)
            .ok_or_else(|| missing(KEY_USERNAME))?;
        let password = get(KEY_PASSWORD)
            .ok_or_else(|| missing(KEY_PASSWORD))?;
        let mode = match get(KEY_MODE) {
            Some(raw) => raw.parse::<Mode>()?,
            None => Mode::default(),
        };

        Self::password(username, password, mode)
    }

    /// Build credentials from the process environment.
    ///
    /// Recognized variables are exactly the credential fields:
    /// `USERNAME`/`PASSWORD`/`MODE` for the password shape, or
    /// `CUSTOMER_ID`/`SUBDOMAIN`/`CLIENT_ID`/`CLIENT_SECRET` for the
    /// client-credentials shape.
    ///
    /// # Errors
    ///
    /// Returns [`InfrakitError::Configuration`] if required variables are
    /// not set.
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = RECOGNIZED_KEYS
            .iter()
            .filter_map(|key| env::var(key).ok().map(|value| ((*key).to_string(), value)))
            .collect();
        Self::from_map(&vars)
    }

    /// Load a dotenv-style file into the environment, then read credentials
    /// from it.
    ///
    /// Values in the file override any already-set process variables, so a
    /// named secrets file wins over ambient shell state.
    ///
    /// # Errors
    ///
    /// Returns [`InfrakitError::Configuration`] if the file cannot be read
    /// or required variables remain unset afterwards.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenvy::from_path_override(path.as_ref()).map_err(|e| {
            InfrakitError::Configuration(format!(
                "failed to load env file '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_env()
    }

    /// Base URL of the REST API for this credential's deployment target.
    ///
    /// A pure function of the deployment selector: the password variant maps
    /// its [`Mode`] to one of the three fixed origins, the client-credentials
    /// variant derives a per-tenant origin from the subdomain (falling back
    /// to the customer id).
    #[must_use]
    pub fn base_url(&self) -> String {
        match self {
            Credentials::Password { mode, .. } => mode.base_url().to_string(),
            Credentials::ClientCredentials {
                customer_id,
                subdomain,
                ..
            } => {
                let host = subdomain.as_deref().unwrap_or(customer_id);
                format!("https://{host}.api.infrakit.com/api/v1")
            }
        }
    }

    /// URL of the first authentication step for this credential shape.
    ///
    /// For the password grant this is the token endpoint itself; for client
    /// credentials it is the per-tenant OIDC discovery document, which in
    /// turn advertises the token endpoint.
    #[must_use]
    pub fn auth_url(&self) -> String {
        match self {
            Credentials::Password { .. } => "https://iam.infrakit.com/auth/token".to_string(),
            Credentials::ClientCredentials { customer_id, .. } => format!(
                "https://auth.infrakit.com/auth/realms/{customer_id}/.well-known/openid-configuration"
            ),
        }
    }

    /// Customer id for the tenant-identifying request header, when the
    /// deployment requires one.
    #[must_use]
    pub fn customer_id(&self) -> Option<&str> {
        match self {
            Credentials::Password { .. } => None,
            Credentials::ClientCredentials { customer_id, .. } => Some(customer_id),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Password { username, mode, .. } => f
                .debug_struct("Credentials::Password")
                .field("username", username)
                .field("mode", mode)
                .finish_non_exhaustive(),
            Credentials::ClientCredentials {
                customer_id,
                subdomain,
                client_id,
                ..
            } => f
                .debug_struct("Credentials::ClientCredentials")
                .field("customer_id", customer_id)
                .field("subdomain", subdomain)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

fn require(key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(missing(key))
    } else {
        Ok(())
    }
}

fn missing(key: &str) -> InfrakitError {
    InfrakitError::Configuration(format!("{key} is not set"))
}
