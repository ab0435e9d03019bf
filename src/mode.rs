//! Deployment mode selection for the single-tenant Infrakit deployments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InfrakitError;

/// Which Infrakit deployment a password-grant client talks to.
///
/// The mapping from mode to origin is closed and exhaustive; parsing any
/// other selector string fails with [`InfrakitError::InvalidMode`] rather
/// than falling back to a default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// `https://app.infrakit.com`
    #[default]
    Production,
    /// `https://beta.infrakit.com`
    Beta,
    /// `https://test.infrakit.com`
    Test,
}

impl Mode {
    /// Base URL of the REST API for this deployment.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Mode::Production => "https://app.infrakit.com/kuura/v1",
            Mode::Beta => "https://beta.infrakit.com/kuura/v1",
            Mode::Test => "https://test.infrakit.com/kuura/v1",
        }
    }

    /// The selector string as it appears in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Production => "production",
            Mode::Beta => "beta",
            Mode::Test => "test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = InfrakitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Mode::Production),
            "beta" => Ok(Mode::Beta),
            "test" => Ok(Mode::Test),
            other => Err(InfrakitError::InvalidMode(other.to_string())),
        }
    }
}
