//! Check case construction.
//!
//! Each builder expands the session data into concrete cases. Building never
//! touches the network; cases whose expectation cannot be computed become
//! [`CaseAction::Unresolved`] so the failure is reported against that case.

use std::collections::BTreeSet;
use std::fmt;

use log::warn;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::aliases::AliasVersionMap;
use crate::config::{
    DEFAULT_LOCALE, DEFAULT_USER_AGENT, USER_AGENT_IE6_WINXP, USER_AGENT_IE6_WINXP_X64, WINXP_PRODUCT_SUFFIXES,
};
use crate::error_handling::CheckError;
use crate::filename::{effective_locale, Platform};
use crate::product_details::ProductDetailsClient;
use crate::suite::SessionData;
use crate::verify::{ExpectedOutcome, OsParam, RequestParameters};

/// Groups of checks, used for naming and for the per-scenario summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Scenario {
    AliasTable,
    MirrorSync,
    AliasRedirect,
    LocaleRedirect,
    WinXpIe6,
    InvalidQuery,
    Product,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::AliasTable => "alias-table",
            Scenario::MirrorSync => "mirror-sync",
            Scenario::AliasRedirect => "alias-redirect",
            Scenario::LocaleRedirect => "locale-redirect",
            Scenario::WinXpIe6 => "winxp-ie6",
            Scenario::InvalidQuery => "invalid-query",
            Scenario::Product => "product",
        }
    }

    pub fn all() -> impl Iterator<Item = Scenario> {
        Scenario::iter()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What running a case does.
#[derive(Debug, Clone)]
pub enum CaseAction {
    /// Every releng key in the alias table must still be published.
    AliasTable,
    /// The mirror's version directory must equal the primary one.
    MirrorSync { mirror: ProductDetailsClient },
    /// Request and compare against an expectation.
    Redirect {
        params: RequestParameters,
        expected: ExpectedOutcome,
    },
    /// Request parameters bouncer cannot serve; expect a 404 echo.
    QueryEcho { params: RequestParameters },
    /// The expectation could not be computed.
    Unresolved(CheckError),
}

/// One named check.
#[derive(Debug, Clone)]
pub struct CheckCase {
    pub scenario: Scenario,
    pub name: String,
    pub action: CaseAction,
}

impl CheckCase {
    fn new(scenario: Scenario, name: String, action: CaseAction) -> Self {
        Self {
            scenario,
            name: format!("{scenario}[{name}]"),
            action,
        }
    }

    /// Sends `user_agent` in place of the built-in default. Cases that pin
    /// their own agent keep it.
    pub fn with_default_user_agent(mut self, user_agent: &str) -> Self {
        match &mut self.action {
            CaseAction::Redirect { params, .. } | CaseAction::QueryEcho { params }
                if params.user_agent == DEFAULT_USER_AGENT =>
            {
                params.user_agent = user_agent.to_string();
            }
            _ => {}
        }
        self
    }
}

/// Product-details sanity checks and alias redirects.
pub fn smoke_cases(
    session: &SessionData,
    hosts: &[String],
    mirror: Option<ProductDetailsClient>,
) -> Vec<CheckCase> {
    let mut cases = vec![CheckCase::new(
        Scenario::AliasTable,
        "releng-keys".to_string(),
        CaseAction::AliasTable,
    )];
    if let Some(mirror) = mirror {
        cases.push(CheckCase::new(
            Scenario::MirrorSync,
            mirror.base_url().to_string(),
            CaseAction::MirrorSync { mirror },
        ));
    }
    cases.extend(alias_cases(session.aliases(), hosts));
    cases
}

/// Locale, Windows XP, invalid-query and `--product` checks.
pub fn redirect_cases(session: &SessionData, hosts: &[String], product: &str) -> Vec<CheckCase> {
    let mut cases = Vec::new();
    cases.extend(locale_cases(session, hosts));
    cases.extend(winxp_cases(session.aliases(), hosts));
    cases.push(invalid_query_case());
    cases.push(product_case(product, hosts));
    cases
}

/// Each published alias on win, osx and linux must redirect to its version's file.
pub fn alias_cases(
    aliases: Result<&AliasVersionMap, &CheckError>,
    hosts: &[String],
) -> Vec<CheckCase> {
    let aliases = match aliases {
        Ok(aliases) => aliases,
        Err(e) => {
            return vec![CheckCase::new(
                Scenario::AliasRedirect,
                "resolve".to_string(),
                CaseAction::Unresolved(e.clone()),
            )]
        }
    };

    let mut cases = Vec::new();
    for platform in [Platform::Win, Platform::Osx, Platform::Linux] {
        for (alias, version) in aliases.iter() {
            if version.is_empty() {
                warn!("Skipping {alias}: product details publish no version for it");
                continue;
            }
            let params = RequestParameters::new(alias, DEFAULT_LOCALE, platform);
            let expected = ExpectedOutcome::download(
                hosts,
                Some(platform.expected_filename(alias, version)),
            );
            cases.push(CheckCase::new(
                Scenario::AliasRedirect,
                format!("{alias}-{version}-{platform}"),
                CaseAction::Redirect { params, expected },
            ));
        }
    }
    cases
}

/// Every localized release build on every platform.
///
/// Only versions that are both built for the locale and currently behind a
/// non-aurora alias are checked.
pub fn locale_cases(session: &SessionData, hosts: &[String]) -> Vec<CheckCase> {
    let Ok(aliases) = session.aliases() else {
        // Reported once by alias_cases
        return Vec::new();
    };
    let current: BTreeSet<&str> = aliases
        .versions()
        .filter(|v| !v.is_empty() && !v.contains('a'))
        .collect();

    let mut cases = Vec::new();
    for builds in session.locales() {
        for version in current.iter().filter(|v| builds.has_version(v)) {
            for platform in Platform::all() {
                let locale = effective_locale(&builds.locale, platform);
                let params = RequestParameters::new(format!("firefox-{version}"), locale.as_str(), platform);
                let expected = ExpectedOutcome::download(
                    hosts,
                    Some(platform.expected_filename("latest", version)),
                );
                cases.push(CheckCase::new(
                    Scenario::LocaleRedirect,
                    format!("{locale}-{version}-{platform}"),
                    CaseAction::Redirect { params, expected },
                ));
            }
        }
    }
    cases
}

/// IE6 on Windows XP is only ever offered the ESR build, whatever the product.
pub fn winxp_cases(
    aliases: Result<&AliasVersionMap, &CheckError>,
    hosts: &[String],
) -> Vec<CheckCase> {
    let esr_version = match aliases {
        Ok(aliases) => aliases.version_for("firefox-esr-latest"),
        Err(_) => return Vec::new(),
    };
    let Some(esr_version) = esr_version.filter(|v| !v.is_empty()) else {
        return vec![CheckCase::new(
            Scenario::WinXpIe6,
            "esr-version".to_string(),
            CaseAction::Unresolved(CheckError::MissingProduct {
                key: "firefox-esr-latest".to_string(),
            }),
        )];
    };

    let mut cases = Vec::new();
    for (nt, user_agent) in [("5.1", USER_AGENT_IE6_WINXP), ("5.2", USER_AGENT_IE6_WINXP_X64)] {
        for suffix in WINXP_PRODUCT_SUFFIXES {
            let params = RequestParameters::new(format!("firefox-{suffix}"), DEFAULT_LOCALE, Platform::Win)
                .with_user_agent(user_agent);
            let expected = ExpectedOutcome::download(hosts, Some(esr_version.to_string()));
            cases.push(CheckCase::new(
                Scenario::WinXpIe6,
                format!("nt{nt}-{suffix}"),
                CaseAction::Redirect { params, expected },
            ));
        }
    }
    cases
}

/// Nonsense product, locale and os.
pub fn invalid_query_case() -> CheckCase {
    let params = RequestParameters::new(
        "firefox-47.0.1",
        "kitty_language",
        OsParam::Unrecognized("stella".to_string()),
    );
    CheckCase::new(
        Scenario::InvalidQuery,
        "kitty_language-stella".to_string(),
        CaseAction::QueryEcho { params },
    )
}

/// The product under test must be served over https from a known CDN.
pub fn product_case(product: &str, hosts: &[String]) -> CheckCase {
    let params = RequestParameters::new(product, DEFAULT_LOCALE, Platform::Win);
    let expected = ExpectedOutcome::download(hosts, None).with_schemes(&["https"]);
    CheckCase::new(
        Scenario::Product,
        format!("{product}-{}", Platform::Win),
        CaseAction::Redirect { params, expected },
    )
}
