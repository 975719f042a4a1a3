//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CDN_HOSTS, DEFAULT_PRODUCT, DEFAULT_USER_AGENT, PRODUCT_DETAILS_BASE_URL,
    REQUEST_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which group of checks to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SuiteSelection {
    /// Smoke checks and redirect checks
    All,
    /// Product-details sanity and alias redirects only
    Smoke,
    /// Locale, Windows XP, invalid-query and product redirects
    Redirects,
}

/// HTTP method used for redirect checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HttpMethod {
    Head,
    Get,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Get => reqwest::Method::GET,
        }
    }
}

/// Checker configuration.
///
/// Parsed from the command line by the binary; library users can build it
/// directly and fill the rest from `Default`.
///
/// # Examples
///
/// ```no_run
/// use bouncer_e2e::Config;
///
/// let config = Config {
///     base_url: "https://download.mozilla.org/".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "bouncer_e2e", version, about)]
pub struct Config {
    /// Bouncer endpoint under test, e.g. https://download.mozilla.org/
    #[arg(long, env = "BOUNCER_BASE_URL")]
    pub base_url: String,

    /// Product label checked by the `product` scenario
    #[arg(long, default_value = DEFAULT_PRODUCT)]
    pub product: String,

    /// Base URL of the product-details JSON service
    #[arg(long, default_value = PRODUCT_DETAILS_BASE_URL)]
    pub product_details_url: String,

    /// Optional mirror of product-details that must agree with the primary one
    #[arg(long)]
    pub mirror_url: Option<String>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP method: head|get
    #[arg(long, value_enum, default_value_t = HttpMethod::Head)]
    pub method: HttpMethod,

    /// Allowed CDN host (repeatable). Defaults to the Mozilla download CDNs.
    #[arg(long = "cdn-host")]
    pub cdn_hosts: Vec<String>,

    /// Checks to run: all|smoke|redirects
    #[arg(long, value_enum, default_value_t = SuiteSelection::All)]
    pub suite: SuiteSelection,

    /// Number of checks in flight at once
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// CDN hosts a redirect may land on; the built-in list unless overridden.
    pub fn allowed_hosts(&self) -> Vec<String> {
        if self.cdn_hosts.is_empty() {
            DEFAULT_CDN_HOSTS.iter().map(|h| h.to_string()).collect()
        } else {
            self.cdn_hosts.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://download.mozilla.org/".to_string(),
            product: DEFAULT_PRODUCT.to_string(),
            product_details_url: PRODUCT_DETAILS_BASE_URL.to_string(),
            mirror_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            method: HttpMethod::Head,
            cdn_hosts: Vec::new(),
            suite: SuiteSelection::All,
            concurrency: 1,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
