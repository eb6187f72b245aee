//! Gateway configuration sourced from the process environment.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `SKEBBY_URL` | gateway base URL (required) |
//! | `SKEBBY_USERNAME` | login username (required) |
//! | `SKEBBY_PASSWORD` | login password (required) |
//! | `SKEBBY_QUALITY` | `high`, `medium`, `low` or `GP`, `TI`, `SI` (default `high`) |
//! | `SKEBBY_REFRESH_ON_UNAUTHORIZED` | re-login and retry once on HTTP 401 (default `false`) |
//! | `SKEBBY_TIMEOUT_SECS` | request timeout in seconds (default: none) |

use std::time::Duration;

use crate::client::{Account, SkebbyClient, SkebbyError};
use crate::domain::MessageQuality;

pub const URL_VAR: &str = "SKEBBY_URL";
pub const USERNAME_VAR: &str = "SKEBBY_USERNAME";
pub const PASSWORD_VAR: &str = "SKEBBY_PASSWORD";
pub const QUALITY_VAR: &str = "SKEBBY_QUALITY";
pub const REFRESH_VAR: &str = "SKEBBY_REFRESH_ON_UNAUTHORIZED";
pub const TIMEOUT_VAR: &str = "SKEBBY_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub account: Account,
    pub quality: MessageQuality,
    pub refresh_on_unauthorized: bool,
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, SkebbyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SkebbyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(SkebbyError::MissingEnv { name });

        let base_url = require(URL_VAR)?;
        let account = Account::new(require(USERNAME_VAR)?, require(PASSWORD_VAR)?)?;

        let quality = match get(QUALITY_VAR) {
            Some(value) => value.parse::<MessageQuality>()?,
            None => MessageQuality::default(),
        };

        let refresh_on_unauthorized = match get(REFRESH_VAR) {
            Some(value) => parse_flag(REFRESH_VAR, &value)?,
            None => false,
        };

        let timeout = match get(TIMEOUT_VAR) {
            Some(value) => Some(Duration::from_secs(value.trim().parse::<u64>().map_err(
                |_| SkebbyError::InvalidSetting {
                    name: TIMEOUT_VAR,
                    value: value.clone(),
                },
            )?)),
            None => None,
        };

        Ok(Self {
            base_url,
            account,
            quality,
            refresh_on_unauthorized,
            timeout,
        })
    }

    /// Build a client with a fresh session from this configuration.
    pub fn build_client(&self) -> Result<SkebbyClient, SkebbyError> {
        let mut builder = SkebbyClient::builder(self.base_url.clone(), self.account.clone())
            .quality(self.quality)
            .refresh_on_unauthorized(self.refresh_on_unauthorized);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, SkebbyError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SkebbyError::InvalidSetting {
            name,
            value: value.to_owned(),
        }),
    }
}
