use crate::dnssec::DEFAULT_CLOCK_SKEW;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid output format: {0} (expected json, table or csv)")]
    InvalidFormat(String),

    #[error("Invalid clock skew: {0}")]
    InvalidClockSkew(String),
}

/// How results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// ASCII table
    Table,
    /// Comma-separated values
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// Defaults for the command-line front end; flags override these
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub format: OutputFormat,
    pub strict: bool,
    /// Seconds of tolerance when checking RRSIG validity windows
    pub clock_skew: i64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            strict: false,
            clock_skew: DEFAULT_CLOCK_SKEW,
        }
    }
}

impl CliConfig {
    /// Create a CliConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(format) = lookup("DNS_VALIDATOR_FORMAT") {
            config.format = format.parse()?;
        }

        if let Some(strict) = lookup("DNS_VALIDATOR_STRICT") {
            config.strict = parse_bool(&strict, false);
        }

        if let Some(skew) = lookup("DNS_VALIDATOR_CLOCK_SKEW") {
            let seconds = skew
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidClockSkew(skew.clone()))?;
            if seconds < 0 {
                return Err(ConfigError::InvalidClockSkew(
                    "Clock skew must not be negative".to_string(),
                ));
            }
            config.clock_skew = seconds;
        }

        Ok(config)
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    }
}
