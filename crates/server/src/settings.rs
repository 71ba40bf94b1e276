//! Application settings.
//!
//! Settings are read from the process environment. An optional `.env` file
//! supplies values for the names the environment does not define. Names are
//! case-sensitive.

mod dotenv;

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::fmt::Display;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

pub(crate) const DEFAULT_SECRET_KEY: &str = "change-this-secret-key-in-production";

/// The result type that uses [SettingsError] as the error type.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// The application settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// The database connection URL.
    pub database_url: String,
    /// The key used to sign access tokens.
    pub secret_key: String,
    /// The access token signing algorithm.
    pub algorithm: Algorithm,
    /// The lifetime of an access token.
    pub access_token_expire_minutes: u32,
    /// The origins allowed to make cross-origin requests.
    pub cors_origins: Vec<String>,
    /// The deployment environment.
    pub environment: Environment,
    /// Whether debug behavior (such as statement echo) is enabled.
    pub debug: bool,
    /// The minimum level of the emitted log records.
    pub log_level: LogLevel,
    /// The path prefix of the first API version.
    pub api_v1_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: String::from("sqlite:///./workout_tracker.db"),
            secret_key: String::from(DEFAULT_SECRET_KEY),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: 30,
            cors_origins: vec![
                String::from("http://localhost:3000"),
                String::from("http://localhost:5173"),
            ],
            environment: Environment::Development,
            debug: true,
            log_level: LogLevel::Info,
            api_v1_prefix: String::from("/api/v1"),
        }
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("cors_origins", &self.cors_origins)
            .field("environment", &self.environment)
            .field("debug", &self.debug)
            .field("log_level", &self.log_level)
            .field("api_v1_prefix", &self.api_v1_prefix)
            .finish()
    }
}

impl Settings {
    /// Loads the settings from the environment, falling back to the
    /// variables of `env_file` when given. A missing file is ignored.
    pub fn load(env_file: Option<&Path>) -> Result<Settings> {
        Self::load_with(|name| env::var(name).ok(), env_file)
    }

    /// Like [Settings::load], with `environment` standing in for the process
    /// environment. Its values win over the ones in `env_file`.
    pub fn load_with<F>(environment: F, env_file: Option<&Path>) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = match env_file {
            Some(path) => dotenv::read(path)?,
            None => HashMap::new(),
        };

        Self::from_lookup(|name| environment(name).or_else(|| file_vars.get(name).cloned()))
    }

    /// Builds the settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let settings = Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            secret_key: lookup("SECRET_KEY").unwrap_or(defaults.secret_key),
            algorithm: parse(&lookup, "ALGORITHM", defaults.algorithm, str::parse)?,
            access_token_expire_minutes: parse(
                &lookup,
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                defaults.access_token_expire_minutes,
                |v| v.parse().map_err(|e| format!("{e}")),
            )?,
            cors_origins: parse(&lookup, "CORS_ORIGINS", defaults.cors_origins, parse_list)?,
            environment: parse(&lookup, "ENVIRONMENT", defaults.environment, str::parse)?,
            debug: parse(&lookup, "DEBUG", defaults.debug, parse_bool)?,
            log_level: parse(&lookup, "LOG_LEVEL", defaults.log_level, str::parse)?,
            api_v1_prefix: lookup("API_V1_PREFIX").unwrap_or(defaults.api_v1_prefix),
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.api_v1_prefix.starts_with('/') || self.api_v1_prefix.ends_with('/') {
            return Err(SettingsError::invalid(
                "API_V1_PREFIX",
                &self.api_v1_prefix,
                "must start with `/` and must not end with `/`",
            ));
        }

        if self.secret_key.trim().is_empty() {
            return Err(SettingsError::invalid("SECRET_KEY", "", "must not be empty"));
        }

        if self.environment == Environment::Production && self.secret_key == DEFAULT_SECRET_KEY {
            return Err(SettingsError::invalid(
                "SECRET_KEY",
                "<redacted>",
                "the default key must be replaced in production",
            ));
        }

        Ok(())
    }
}

fn parse<T, F>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    parse: F,
) -> Result<T>
where
    F: Fn(&str) -> std::result::Result<T, String>,
{
    match lookup(name) {
        Some(value) => parse(value.trim())
            .map_err(|reason| SettingsError::invalid(name, &value, &reason)),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(String::from("expected a boolean")),
    }
}

fn parse_list(value: &str) -> std::result::Result<Vec<String>, String> {
    if value.starts_with('[') {
        return serde_json::from_str(value).map_err(|e| format!("invalid JSON list: {e}"));
    }

    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

/// The supported access token signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Algorithm {
    /// HMAC with SHA-256.
    HS256,
    /// HMAC with SHA-384.
    HS384,
    /// HMAC with SHA-512.
    HS512,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(String::from("expected one of HS256, HS384, HS512")),
        }
    }
}

/// The deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// A developer machine.
    Development,
    /// A production deployment. The default secret key is refused.
    Production,
    /// Automated tests.
    Test,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(String::from("expected one of development, production, test")),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

/// The minimum severity of emitted log records, from the most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// `TRACE`.
    Trace,
    /// `DEBUG`.
    Debug,
    /// `INFO`.
    Info,
    /// `WARN` or `WARNING`.
    Warn,
    /// `ERROR` or `CRITICAL`.
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            _ => Err(String::from(
                "expected one of TRACE, DEBUG, INFO, WARNING, ERROR, CRITICAL",
            )),
        }
    }
}

/// The error type for loading the settings.
#[derive(Debug)]
pub enum SettingsError {
    /// The `.env` file exists but could not be read.
    Io {
        /// The file.
        path: PathBuf,
        /// The cause.
        error: io::Error,
    },

    /// A line of the `.env` file is malformed.
    Parse {
        /// The file.
        path: PathBuf,
        /// The 1-based line number.
        line: usize,
        /// What is wrong with the line.
        message: String,
    },

    /// A variable holds a value that cannot be used.
    InvalidValue {
        /// The variable name.
        name: &'static str,
        /// The offending value.
        value: String,
        /// What a valid value looks like.
        reason: String,
    },
}

impl SettingsError {
    fn invalid(name: &'static str, value: &str, reason: &str) -> SettingsError {
        SettingsError::InvalidValue {
            name,
            value: value.to_owned(),
            reason: reason.to_owned(),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let settings_error = "settings error:";

        match self {
            SettingsError::Io { path, error } => {
                write!(f, "{settings_error} reading `{}` failed: {error}", path.display())
            }
            SettingsError::Parse {
                path,
                line,
                message,
            } => write!(
                f,
                "{settings_error} `{}` line {line}: {message}",
                path.display()
            ),
            SettingsError::InvalidValue {
                name,
                value,
                reason,
            } => write!(f, "{settings_error} invalid {name} = `{value}`: {reason}"),
        }
    }
}
