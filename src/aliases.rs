//! Releng product keys to bouncer aliases.
//!
//! Release engineering names products by keys such as
//! `LATEST_FIREFOX_VERSION`; bouncer exposes them as aliases such as
//! `firefox-latest`. The table below pairs the two. Some releng products have
//! no bouncer alias and are not checked.

use std::collections::BTreeMap;

use log::debug;

use crate::error_handling::CheckError;
use crate::product_details::ProductVersionDirectory;

/// Public bouncer name for a releng product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BouncerAlias {
    Published(&'static str),
    Unpublished,
}

/// One row of the alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasEntry {
    pub releng_key: &'static str,
    pub alias: BouncerAlias,
}

const fn published(releng_key: &'static str, alias: &'static str) -> AliasEntry {
    AliasEntry {
        releng_key,
        alias: BouncerAlias::Published(alias),
    }
}

const fn unpublished(releng_key: &'static str) -> AliasEntry {
    AliasEntry {
        releng_key,
        alias: BouncerAlias::Unpublished,
    }
}

/// Mapping adapted from ship-it's kickoff config.
pub const DEFAULT_ALIAS_TABLE: &[AliasEntry] = &[
    published("FIREFOX_AURORA", "firefox-aurora-latest"),
    published("FIREFOX_ESR_NEXT", "firefox-esr-latest"),
    published("LATEST_FIREFOX_VERSION", "firefox-latest"),
    unpublished("FIREFOX_ESR"),
    published("FIREFOX_NIGHTLY", "firefox-nightly-latest"),
    unpublished("LATEST_FIREFOX_OLDER_VERSION"),
    published("LATEST_FIREFOX_RELEASED_DEVEL_VERSION", "firefox-beta-latest"),
    published("LATEST_FIREFOX_DEVEL_VERSION", "firefox-beta-latest"),
];

/// Bouncer alias -> version expected behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasVersionMap {
    entries: BTreeMap<String, String>,
}

impl AliasVersionMap {
    pub fn version_for(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, v)| (a.as_str(), v.as_str()))
    }

    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the alias -> version map for every published alias in `table`.
///
/// Unpublished rows are skipped. When two rows publish the same alias the
/// later row wins, so each alias carries exactly one version.
///
/// # Errors
///
/// `CheckError::MissingProduct` when a published row's releng key is absent
/// from `directory`.
pub fn resolve(
    directory: &ProductVersionDirectory,
    table: &[AliasEntry],
) -> Result<AliasVersionMap, CheckError> {
    let mut entries = BTreeMap::new();
    for entry in table {
        let BouncerAlias::Published(alias) = entry.alias else {
            continue;
        };
        let version = directory
            .get(entry.releng_key)
            .ok_or_else(|| CheckError::MissingProduct {
                key: entry.releng_key.to_string(),
            })?;
        if let Some(previous) = entries.insert(alias.to_string(), version.clone()) {
            if &previous != version {
                debug!(
                    "Alias {alias} remapped from {previous} to {version} by {}",
                    entry.releng_key
                );
            }
        }
    }
    Ok(AliasVersionMap { entries })
}

/// Table keys that the directory no longer publishes.
pub fn missing_keys(directory: &ProductVersionDirectory, table: &[AliasEntry]) -> Vec<String> {
    table
        .iter()
        .filter(|entry| !directory.contains_key(entry.releng_key))
        .map(|entry| entry.releng_key.to_string())
        .collect()
}

/// Directory keys the table does not know about.
pub fn unknown_keys(directory: &ProductVersionDirectory, table: &[AliasEntry]) -> Vec<String> {
    directory
        .keys()
        .filter(|key| !table.iter().any(|entry| entry.releng_key == key.as_str()))
        .cloned()
        .collect()
}
