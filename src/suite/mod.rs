//! The bouncer check suite.
//!
//! Session data (versions, locale builds, resolved aliases) is loaded once
//! before any check runs and is read-only afterwards; every case receives it
//! by reference. Cases run in order, `concurrency` at a time.

pub mod cases;
mod report;

use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::aliases::{self, AliasEntry, AliasVersionMap, DEFAULT_ALIAS_TABLE};
use crate::config::{Config, SuiteSelection};
use crate::error_handling::CheckError;
use crate::initialization::{init_client, init_redirect_client};
use crate::product_details::{LocaleBuilds, ProductDetailsClient, ProductVersionDirectory};
use crate::verify::RedirectVerifier;

use cases::{CaseAction, CheckCase};

pub use cases::Scenario;
pub use report::{print_report, CheckOutcome, SuiteReport};

/// Product data shared by every case of a run.
#[derive(Debug, Clone)]
pub struct SessionData {
    directory: ProductVersionDirectory,
    locales: Vec<LocaleBuilds>,
    aliases: Result<AliasVersionMap, CheckError>,
}

impl SessionData {
    /// Fetches versions and locale builds, then resolves the default alias table.
    ///
    /// # Errors
    ///
    /// `CheckError::Unavailable` when product details cannot be fetched. A
    /// failed alias resolution is kept and reported by the cases that need it.
    pub async fn load(details: &ProductDetailsClient) -> Result<Self, CheckError> {
        let directory = details.fetch_versions().await?;
        let locales = details.fetch_primary_builds().await?;
        info!(
            "Loaded {} products and {} locales from {}",
            directory.len(),
            locales.len(),
            details.base_url()
        );
        Ok(Self::from_parts(directory, locales, DEFAULT_ALIAS_TABLE))
    }

    pub fn from_parts(
        directory: ProductVersionDirectory,
        locales: Vec<LocaleBuilds>,
        table: &[AliasEntry],
    ) -> Self {
        let aliases = aliases::resolve(&directory, table);
        Self {
            directory,
            locales,
            aliases,
        }
    }

    pub fn directory(&self) -> &ProductVersionDirectory {
        &self.directory
    }

    pub fn locales(&self) -> &[LocaleBuilds] {
        &self.locales
    }

    pub fn aliases(&self) -> Result<&AliasVersionMap, &CheckError> {
        self.aliases.as_ref()
    }
}

/// Loads session data, builds the selected cases and runs them.
///
/// # Errors
///
/// Returns an error when clients cannot be built or product details are
/// unavailable. Individual check failures are part of the report.
pub async fn run_suite(config: &Config) -> Result<SuiteReport> {
    let start = Instant::now();

    let details_client = init_client(config).context("Failed to initialize HTTP client")?;
    let redirect_client =
        init_redirect_client(config).context("Failed to initialize redirect client")?;

    let details = ProductDetailsClient::new(&config.product_details_url, details_client.clone())
        .context("Invalid product details URL")?;
    let verifier = RedirectVerifier::new(redirect_client, &config.base_url)
        .context("Invalid bouncer base URL")?
        .with_method(config.method.into());

    let session = SessionData::load(&details)
        .await
        .context("Failed to load product details")?;

    let mirror = match &config.mirror_url {
        Some(url) => Some(
            ProductDetailsClient::new(url, details_client).context("Invalid mirror URL")?,
        ),
        None => None,
    };

    let hosts = config.allowed_hosts();
    let mut all_cases = Vec::new();
    if matches!(config.suite, SuiteSelection::All | SuiteSelection::Smoke) {
        all_cases.extend(cases::smoke_cases(&session, &hosts, mirror));
    }
    if matches!(config.suite, SuiteSelection::All | SuiteSelection::Redirects) {
        all_cases.extend(cases::redirect_cases(&session, &hosts, &config.product));
    }
    let all_cases: Vec<CheckCase> = all_cases
        .into_iter()
        .map(|case| case.with_default_user_agent(&config.user_agent))
        .collect();
    info!(
        "Running {} checks against {}",
        all_cases.len(),
        verifier.base_url()
    );

    let outcomes = run_cases(all_cases, &session, &verifier, config.concurrency).await;

    Ok(SuiteReport {
        outcomes,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

/// Runs `cases` with at most `concurrency` in flight, keeping their order.
pub async fn run_cases(
    cases: Vec<CheckCase>,
    session: &SessionData,
    verifier: &RedirectVerifier,
    concurrency: usize,
) -> Vec<CheckOutcome> {
    stream::iter(cases)
        .map(|case| run_case(case, session, verifier))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn run_case(case: CheckCase, session: &SessionData, verifier: &RedirectVerifier) -> CheckOutcome {
    debug!("Running {}", case.name);
    let result = match case.action {
        CaseAction::AliasTable => check_alias_table(session),
        CaseAction::MirrorSync { mirror } => check_mirror(session, &mirror).await,
        CaseAction::Redirect { params, expected } => verifier.verify(&expected, &params).await,
        CaseAction::QueryEcho { params } => verifier.verify_query_echo(&params).await,
        CaseAction::Unresolved(e) => Err(e),
    };

    match &result {
        Ok(()) => info!("PASSED {}", case.name),
        Err(e) => warn!("FAILED {}: {}", case.name, e.kind()),
    }

    CheckOutcome {
        scenario: case.scenario,
        name: case.name,
        result,
    }
}

/// The releng keys the alias table relies on must all still be published.
fn check_alias_table(session: &SessionData) -> Result<(), CheckError> {
    let unknown = aliases::unknown_keys(session.directory(), DEFAULT_ALIAS_TABLE);
    if !unknown.is_empty() {
        info!("Product details publish keys with no alias mapping: {}", unknown.join(", "));
    }

    let missing = aliases::missing_keys(session.directory(), DEFAULT_ALIAS_TABLE);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::AssertionFailure {
            message: format!(
                "Release engineering no longer publishes: {}.\nPublished keys: {}",
                missing.join(", "),
                session.directory().keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        })
    }
}

async fn check_mirror(session: &SessionData, mirror: &ProductDetailsClient) -> Result<(), CheckError> {
    let mirrored = mirror.fetch_versions().await?;
    if &mirrored == session.directory() {
        return Ok(());
    }

    let mut differences = Vec::new();
    for (key, version) in session.directory() {
        match mirrored.get(key) {
            Some(other) if other == version => {}
            Some(other) => differences.push(format!("{key}: {version} != {other}")),
            None => differences.push(format!("{key}: missing from mirror")),
        }
    }
    for key in mirrored.keys().filter(|k| !session.directory().contains_key(*k)) {
        differences.push(format!("{key}: only on mirror"));
    }
    Err(CheckError::AssertionFailure {
        message: format!(
            "Product details mirror {} is out of sync:\n {}",
            mirror.base_url(),
            differences.join("\n ")
        ),
    })
}
