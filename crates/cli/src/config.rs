// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings resolution.
//!
//! Every setting is taken from the first source that provides it:
//! command line, then environment, then config file, then built-in default.
//! The config file is TOML and may set any of:
//!
//! ```toml
//! subdomain = "acme"
//! email = "agent@acme.com"
//! token = true
//! pickle_path = "/var/tmp/tickets.pkl"
//! timeout_secs = 10
//! page_size = 50
//! max_retries = 5
//! strict = false
//! log_file = "/tmp/ztv.log"
//! verbosity = "info"
//! output = "text"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;
use ztv_core::MalformedPolicy;

use crate::cli::{Cli, OutputFormat, Verbosity};
use crate::env;
use crate::error::{Error, Result};
use crate::remote::{ClientOptions, Credentials, RetryPolicy, MAX_PAGE_SIZE};
use crate::repository::RepositoryMode;

const CONFIG_DIR_NAME: &str = "ztv";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_PICKLE_PATH: &str = "tickets.pkl";
pub const DEFAULT_LOG_FILE: &str = ".ztv.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub subdomain: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub token: Option<bool>,
    pub pickle_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub max_retries: Option<u32>,
    pub strict: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub verbosity: Option<String>,
    pub output: Option<String>,
}

impl FileConfig {
    /// Parse config file contents. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })
    }

    /// Load the config file.
    ///
    /// An explicitly named file must exist. The default location is used
    /// only if a file is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => return Ok(FileConfig::default()),
            },
        };
        let content = fs::read_to_string(&path).map_err(|e| Error::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let config = Self::parse(&content, &path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Returns `<config dir>/ztv/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Settings read from the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub subdomain: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub log_filter: Option<String>,
    pub no_color: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        EnvConfig {
            subdomain: env::subdomain(),
            email: env::email(),
            password: env::password(),
            log_filter: env::log_filter(),
            no_color: env::no_color(),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub offline: bool,
    pub subdomain: Option<String>,
    pub email: Option<String>,
    password: Option<String>,
    pub token: bool,
    /// Save fetched tickets to `pickle_path`.
    pub save: bool,
    pub pickle_path: PathBuf,
    pub timeout: Duration,
    pub page_size: u32,
    pub max_retries: u32,
    pub strict: bool,
    pub log_file: PathBuf,
    /// `EnvFilter` directive for logging.
    pub log_filter: String,
    pub output: OutputFormat,
    pub no_color: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, env: &EnvConfig, file: &FileConfig) -> Result<Self> {
        let file_path = || {
            cli.config_file
                .clone()
                .or_else(default_config_path)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
        };
        let invalid = |key: &str, value: &str| Error::Config {
            path: file_path(),
            reason: format!("invalid value '{value}' for {key}"),
        };

        let file_verbosity = file
            .verbosity
            .as_deref()
            .map(|v| Verbosity::from_str(v, true).map_err(|_| invalid("verbosity", v)))
            .transpose()?;
        let file_output = file
            .output
            .as_deref()
            .map(|v| OutputFormat::from_str(v, true).map_err(|_| invalid("output", v)))
            .transpose()?;
        let page_size = cli.page_size.or(file.page_size).unwrap_or(MAX_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(invalid("page_size", &page_size.to_string()));
        }
        let timeout_secs = cli
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(invalid("timeout_secs", "0"));
        }

        let verbosity = cli.verbosity.or(file_verbosity).unwrap_or_default();
        let log_filter = env
            .log_filter
            .clone()
            .unwrap_or_else(|| verbosity.as_filter().to_string());

        Ok(Settings {
            offline: cli.unpickle_tickets,
            subdomain: pick(&cli.subdomain, &env.subdomain, &file.subdomain),
            email: pick(&cli.email, &env.email, &file.email),
            password: pick(&cli.password, &env.password, &file.password),
            token: cli.token || file.token.unwrap_or(false),
            save: cli.pickle_tickets,
            pickle_path: cli
                .pickle_path
                .clone()
                .or_else(|| file.pickle_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PICKLE_PATH)),
            timeout: Duration::from_secs(timeout_secs),
            page_size,
            max_retries: cli
                .max_retries
                .or(file.max_retries)
                .unwrap_or(RetryPolicy::default().max_retries),
            strict: cli.strict || file.strict.unwrap_or(false),
            log_file: cli
                .log_file
                .clone()
                .or_else(|| file.log_file.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_filter,
            output: cli.output.or(file_output).unwrap_or_default(),
            no_color: env.no_color,
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            page_size: self.page_size,
            retry: RetryPolicy {
                max_retries: self.max_retries,
                ..RetryPolicy::default()
            },
            malformed: if self.strict {
                MalformedPolicy::Abort
            } else {
                MalformedPolicy::Skip
            },
        }
    }

    /// Build the repository mode. Live mode needs all three credentials.
    pub fn repository_mode(&self) -> Result<RepositoryMode> {
        if self.offline {
            return Ok(RepositoryMode::Offline {
                path: self.pickle_path.clone(),
            });
        }
        let subdomain = self
            .subdomain
            .clone()
            .ok_or(Error::MissingSetting("subdomain"))?;
        let email = self.email.clone().ok_or(Error::MissingSetting("email"))?;
        let password = self
            .password
            .clone()
            .ok_or(Error::MissingSetting("password"))?;
        Ok(RepositoryMode::Live {
            credentials: Credentials::new(subdomain, email, password).with_token(self.token),
            save_to: self.save.then(|| self.pickle_path.clone()),
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("offline", &self.offline)
            .field("subdomain", &self.subdomain)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token)
            .field("save", &self.save)
            .field("pickle_path", &self.pickle_path)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .field("max_retries", &self.max_retries)
            .field("strict", &self.strict)
            .field("log_file", &self.log_file)
            .field("log_filter", &self.log_filter)
            .field("output", &self.output)
            .finish()
    }
}

fn pick(cli: &Option<String>, env: &Option<String>, file: &Option<String>) -> Option<String> {
    cli.clone()
        .or_else(|| env.clone())
        .or_else(|| file.clone())
        .filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
