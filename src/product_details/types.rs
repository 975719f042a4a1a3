//! Data shapes returned by product-details.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

/// Current version per releng product key, e.g.
/// `LATEST_FIREFOX_VERSION -> "49.0"`.
pub type ProductVersionDirectory = BTreeMap<String, String>;

/// A `firefox_versions.json` value. Retired products are published as `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum VersionEntry {
    Version(String),
    Other(Value),
}

/// Body of `firefox_versions.json`.
pub(crate) type VersionsDocument = BTreeMap<String, VersionEntry>;

/// A locale's entry in `firefox_primary_builds.json`: version -> per-OS
/// build info. Only the versions are used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LocaleEntry {
    Builds(BTreeMap<String, Value>),
    Other(Value),
}

/// Body of `firefox_primary_builds.json`.
pub(crate) type PrimaryBuildsDocument = BTreeMap<String, LocaleEntry>;

/// Builds available for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBuilds {
    pub locale: String,
    /// Versions with a localized build, excluding aurora and ESR builds.
    pub versions: Vec<String>,
}

impl LocaleBuilds {
    /// Builds the entry for `locale` from the versions it has builds for.
    pub fn from_versions<I>(locale: &str, versions: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            locale: locale.to_string(),
            versions: versions
                .into_iter()
                .filter(|version| is_primary_build(version))
                .collect(),
        }
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }
}

/// Aurora builds (`a` in the version) and ESR builds are not checked per locale.
pub(crate) fn is_primary_build(version: &str) -> bool {
    !version.contains('a') && !version.contains("esr")
}

/// Keeps the products that carry a version string.
pub(crate) fn directory_from_document(document: VersionsDocument) -> ProductVersionDirectory {
    document
        .into_iter()
        .filter_map(|(key, entry)| match entry {
            VersionEntry::Version(version) => Some((key, version)),
            VersionEntry::Other(other) => {
                debug!("Ignoring non-string product-details entry {key}: {other}");
                None
            }
        })
        .collect()
}

/// One [`LocaleBuilds`] per locale whose entry is a version map.
pub(crate) fn locales_from_document(document: PrimaryBuildsDocument) -> Vec<LocaleBuilds> {
    document
        .into_iter()
        .filter_map(|(locale, entry)| match entry {
            LocaleEntry::Builds(builds) => Some(LocaleBuilds::from_versions(&locale, builds.into_keys())),
            LocaleEntry::Other(other) => {
                debug!("Ignoring locale {locale} with unexpected builds value: {other}");
                None
            }
        })
        .collect()
}
