//! Server Configuration
//!
//! Resolves settings from command-line flags, then environment variables, then defaults.

use crate::storage::store::WritePolicy;

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_FILE: &str = "data/responses.json";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

pub const USAGE: &str = "\
Usage: survey-collector [--bind <addr:port> | --port <port>] [--data <file>] [--public <dir>]
                        [--unserialized-writes] [--verbose]

Environment: SURVEY_BIND, PORT, SURVEY_DATA_FILE, SURVEY_PUBLIC_DIR, SURVEY_UNSERIALIZED_WRITES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(String),
    #[error("invalid bind address {value:?}: {source}")]
    InvalidAddress {
        value: String,
        source: AddrParseError,
    },
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub public_dir: PathBuf,
    pub write_policy: WritePolicy,
    pub verbose: bool,
}

impl ServerConfig {
    /// Builds the configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// `args` excludes the program name. `env` looks up an environment variable.
    pub fn from_sources<F>(args: &[String], env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut bind: Option<String> = None;
        let mut port: Option<String> = None;
        let mut data_file: Option<String> = None;
        let mut public_dir: Option<String> = None;
        let mut unserialized = false;
        let mut verbose = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--bind" => bind = Some(flag_value(&mut iter, arg)?),
                "--port" => port = Some(flag_value(&mut iter, arg)?),
                "--data" => data_file = Some(flag_value(&mut iter, arg)?),
                "--public" => public_dir = Some(flag_value(&mut iter, arg)?),
                "--unserialized-writes" => unserialized = true,
                "--verbose" | "-v" => verbose = true,
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        let bind_addr = match bind.or_else(|| env("SURVEY_BIND")) {
            Some(value) => value
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidAddress { value, source })?,
            None => {
                let port = match port.or_else(|| env("PORT")) {
                    Some(value) => value
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidPort(value))?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        if !unserialized {
            unserialized = env("SURVEY_UNSERIALIZED_WRITES")
                .is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"));
        }

        Ok(Self {
            bind_addr,
            data_file: data_file
                .or_else(|| env("SURVEY_DATA_FILE"))
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
                .into(),
            public_dir: public_dir
                .or_else(|| env("SURVEY_PUBLIC_DIR"))
                .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string())
                .into(),
            write_policy: if unserialized {
                WritePolicy::Unserialized
            } else {
                WritePolicy::Serialized
            },
            verbose,
        })
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<String, ConfigError> {
    iter.next()
        .cloned()
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}
