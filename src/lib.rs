//! bouncer_e2e library: end-to-end checks for the download bouncer.
//!
//! Bouncer turns `?product=…&lang=…&os=…` into a redirect to a file on the
//! download CDN. This crate works out which file each request should land on,
//! from release engineering's product-details data, and checks that bouncer
//! agrees.
//!
//! # Example
//!
//! ```no_run
//! use bouncer_e2e::{run_suite, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     base_url: "https://download.mozilla.org/".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = run_suite(&config).await?;
//! println!("{} of {} checks passed", report.passed(), report.total());
//! # Ok(())
//! # }
//! ```

pub mod aliases;
pub mod config;
pub mod error_handling;
pub mod filename;
pub mod initialization;
pub mod product_details;
pub mod suite;
pub mod verify;

// Re-export public API
pub use aliases::{resolve, AliasVersionMap, BouncerAlias, DEFAULT_ALIAS_TABLE};
pub use config::{Config, HttpMethod, LogFormat, LogLevel, SuiteSelection};
pub use error_handling::CheckError;
pub use filename::{effective_locale, expected_filename, Platform};
pub use product_details::ProductDetailsClient;
pub use suite::{print_report, run_suite, SessionData, SuiteReport};
pub use verify::{ExpectedOutcome, FollowRedirects, ObservedResponse, RedirectVerifier, RequestParameters};
