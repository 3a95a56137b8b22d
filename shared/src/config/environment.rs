//! Deployment environment and log output settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{env_opt, env_or};

/// Where the server is running
///
/// Production refuses test doubles: plaintext passwords and the debug captcha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// Read `APP_ENV`, then `ENVIRONMENT`; unknown values mean development
    pub fn from_env() -> Self {
        env_opt("APP_ENV")
            .or_else(|| env_opt("ENVIRONMENT"))
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let env = match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            other => return Err(format!("unknown environment '{}'", other)),
        };
        Ok(env)
    }
}

/// Log output settings for the subscriber installed by the server binary
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Attach file and line to every event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::defaults_for(Environment::Development)
    }
}

impl LoggingConfig {
    /// Human-readable debug output locally, JSON at info elsewhere
    pub fn defaults_for(env: Environment) -> Self {
        let local = env == Environment::Development;
        Self {
            level: String::from(if local { "debug" } else { "info" }),
            format: if local { LogFormat::Pretty } else { LogFormat::Json },
            source_location: local,
        }
    }

    /// Environment defaults overridden by `LOG_LEVEL`, `LOG_FORMAT` and
    /// `LOG_SOURCE_LOCATION`
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::defaults_for(env);
        Self {
            level: env_opt("LOG_LEVEL").unwrap_or(defaults.level),
            format: env_or("LOG_FORMAT", defaults.format),
            source_location: env_or("LOG_SOURCE_LOCATION", defaults.source_location),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}
