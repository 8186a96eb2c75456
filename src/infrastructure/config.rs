use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const SANDBOX_BASE_URL: &str = "https://connect.squareupsandbox.com";
pub const PRODUCTION_BASE_URL: &str = "https://connect.squareup.com";
pub const DEFAULT_SQUARE_VERSION: &str = "2023-10-18";
pub const DEFAULT_CURRENCY: &str = "GBP";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// Sandbox test nonces.
pub const CARD_SOURCE_ID: &str = "cnon:card-nonce-ok";
pub const BANK_TRANSFER_SOURCE_ID: &str = "bnon:bank-nonce-ok";
// Keywords, not tokens.
pub const CASH_SOURCE_ID: &str = "CASH";
pub const EXTERNAL_SOURCE_ID: &str = "EXTERNAL";
pub const EXTERNAL_PAYMENT_TYPE: &str = "OTHER";

pub const TAX_SCOPE: &str = "ORDER";
pub const PAYMENT_REQUEST_TYPE: &str = "BALANCE";
pub const DEFAULT_INVOICE_TITLE: &str = "Invoice for ice cream truck";
pub const DEFAULT_DELIVERY_METHOD: &str = "EMAIL";
pub static DEFAULT_INVOICE_DUE_DATE: Lazy<NaiveDate> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(2030, 11, 14).expect("2030-11-14 is a valid calendar date")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SQUARE_ACCESS_TOKEN must be set")]
    MissingAccessToken,
    #[error("unknown Square environment {0:?}, expected sandbox or production")]
    UnknownEnvironment(String),
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Everything a [`SquareClient`](crate::infrastructure::http_clients::SquareClient)
/// needs to reach the API. Built once by the caller and handed to the client.
#[derive(Clone)]
pub struct SquareConfig {
    pub access_token: String,
    pub environment: Environment,
    pub base_url: String,
    pub square_version: String,
    pub currency: String,
    pub card_source_id: String,
    pub bank_transfer_source_id: String,
    pub timeout: Duration,
}

impl SquareConfig {
    /// Sandbox defaults with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            environment: Environment::Sandbox,
            base_url: Environment::Sandbox.base_url().to_string(),
            square_version: DEFAULT_SQUARE_VERSION.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            card_source_id: CARD_SOURCE_ID.to_string(),
            bank_transfer_source_id: BANK_TRANSFER_SOURCE_ID.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SquareConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("SQUARE_ACCESS_TOKEN")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingAccessToken)?;
        let environment = match lookup("SQUARE_ENVIRONMENT") {
            Some(value) => value.parse::<Environment>()?,
            None => Environment::Sandbox,
        };
        let timeout_ms = match lookup("SQUARE_TIMEOUT_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "SQUARE_TIMEOUT_MS",
                    value,
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };
        let currency = lookup("SQUARE_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidValue {
                var: "SQUARE_CURRENCY",
                value: currency,
            });
        }

        let mut config = Self::new(access_token)
            .with_environment(environment)
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_currency(currency);
        if let Some(base_url) = lookup("SQUARE_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Some(version) = lookup("SQUARE_VERSION") {
            config = config.with_square_version(version);
        }
        if let Some(source) = lookup("SQUARE_CARD_SOURCE_ID") {
            config.card_source_id = source;
        }
        if let Some(source) = lookup("SQUARE_BANK_TRANSFER_SOURCE_ID") {
            config.bank_transfer_source_id = source;
        }
        Ok(config)
    }

    /// Also resets `base_url` to the environment's endpoint.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self.base_url = environment.base_url().to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_square_version(mut self, version: impl Into<String>) -> Self {
        self.square_version = version.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for SquareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquareConfig")
            .field("access_token", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("square_version", &self.square_version)
            .field("currency", &self.currency)
            .field("card_source_id", &self.card_source_id)
            .field("bank_transfer_source_id", &self.bank_transfer_source_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}
