//! Expected download filenames.
//!
//! Release builds are published under display names (`Firefox Setup 49.0.exe`,
//! `Firefox 49.0.dmg`, `firefox-49.0.tar.bz2`); nightly and aurora builds use
//! the en-US build-system names. Spaces appear URL-encoded because the
//! filenames are matched against redirect URLs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error_handling::CheckError;

/// Operating systems bouncer serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Platform {
    Win,
    Win64,
    Linux,
    Linux64,
    Osx,
}

impl Platform {
    pub fn all() -> impl Iterator<Item = Platform> {
        Platform::iter()
    }

    /// Value of the `os` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Win => "win",
            Platform::Win64 => "win64",
            Platform::Linux => "linux",
            Platform::Linux64 => "linux64",
            Platform::Osx => "osx",
        }
    }

    pub fn from_query(os: &str) -> Option<Self> {
        match os {
            "win" => Some(Platform::Win),
            "win64" => Some(Platform::Win64),
            "linux" => Some(Platform::Linux),
            "linux64" => Some(Platform::Linux64),
            "osx" => Some(Platform::Osx),
            _ => None,
        }
    }

    /// Filename bouncer should redirect to for `alias` at `version`.
    pub fn expected_filename(&self, alias: &str, version: &str) -> String {
        let pre_release = Channel::from_alias(alias) == Channel::PreRelease;
        match (self, pre_release) {
            (Platform::Win | Platform::Win64, true) => {
                format!("firefox-{version}.en-US.win32.installer.exe")
            }
            (Platform::Win | Platform::Win64, false) => format!("Firefox%20Setup%20{version}.exe"),
            (Platform::Osx, true) => format!("firefox-{version}.en-US.mac.dmg"),
            (Platform::Osx, false) => format!("Firefox%20{version}.dmg"),
            (Platform::Linux | Platform::Linux64, true) => {
                format!("firefox-{version}.en-US.linux-i686.tar.bz2")
            }
            (Platform::Linux | Platform::Linux64, false) => format!("firefox-{version}.tar.bz2"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release channel implied by a bouncer alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Nightly and aurora builds
    PreRelease,
    /// Release, beta and ESR builds
    Release,
}

impl Channel {
    pub fn from_alias(alias: &str) -> Self {
        if alias.contains("aurora") || alias.contains("nightly") {
            Channel::PreRelease
        } else {
            Channel::Release
        }
    }
}

/// Expected filename for a raw `os` query value.
///
/// # Errors
///
/// `CheckError::UnsupportedPlatform` when `os` is not one of the five
/// platforms bouncer serves.
pub fn expected_filename(os: &str, alias: &str, version: &str) -> Result<String, CheckError> {
    let platform = Platform::from_query(os).ok_or_else(|| CheckError::UnsupportedPlatform {
        os: os.to_string(),
        alias: alias.to_string(),
        version: version.to_string(),
    })?;
    Ok(platform.expected_filename(alias, version))
}

/// Locale to send for `locale` on `platform`.
///
/// Japanese has a macOS-specific locale code.
pub fn effective_locale(locale: &str, platform: Platform) -> String {
    if locale == "ja" && platform == Platform::Osx {
        "ja-JP-mac".to_string()
    } else {
        locale.to_string()
    }
}

// Order matters: the generic tarball pattern would also match the en-US one.
static FILENAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^firefox-(?P<version>.+)\.en-US\.win32\.installer\.exe$",
        r"^firefox-(?P<version>.+)\.en-US\.mac\.dmg$",
        r"^firefox-(?P<version>.+)\.en-US\.linux-i686\.tar\.bz2$",
        r"^Firefox(?:%20| )Setup(?:%20| )(?P<version>.+)\.exe$",
        r"^Firefox(?:%20| )(?P<version>.+)\.dmg$",
        r"^firefox-(?P<version>.+)\.tar\.bz2$",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Recovers the version from a download filename or a URL ending in one.
pub fn version_from_filename(filename_or_url: &str) -> Option<String> {
    let name = filename_or_url
        .split(['?', '#'])
        .next()
        .unwrap_or(filename_or_url)
        .rsplit('/')
        .next()
        .unwrap_or(filename_or_url);
    FILENAME_PATTERNS.iter().find_map(|re| {
        re.captures(name)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.as_str().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEASE_ALIASES: &[&str] = &[
        "firefox-latest",
        "firefox-beta-latest",
        "firefox-esr-latest",
        "firefox-stub",
        "latest",
    ];
    const PRE_RELEASE_ALIASES: &[&str] = &["firefox-nightly-latest", "firefox-aurora-latest"];

    #[test]
    fn test_nightly_windows_installer() {
        assert_eq!(
            expected_filename("win", "firefox-nightly-latest", "58.0a1").unwrap(),
            "firefox-58.0a1.en-US.win32.installer.exe"
        );
    }

    #[test]
    fn test_release_osx_dmg_is_url_encoded() {
        assert_eq!(
            expected_filename("osx", "firefox-latest", "49.0").unwrap(),
            "Firefox%2049.0.dmg"
        );
    }

    #[test]
    fn test_beta_linux64_tarball() {
        assert_eq!(
            expected_filename("linux64", "firefox-beta-latest", "49.0b10").unwrap(),
            "firefox-49.0b10.tar.bz2"
        );
    }

    #[test]
    fn test_release_windows_setup() {
        assert_eq!(
            expected_filename("win64", "firefox-latest", "49.0").unwrap(),
            "Firefox%20Setup%2049.0.exe"
        );
    }

    #[test]
    fn test_aurora_mac_and_linux() {
        assert_eq!(
            expected_filename("osx", "firefox-aurora-latest", "51.0a2").unwrap(),
            "firefox-51.0a2.en-US.mac.dmg"
        );
        assert_eq!(
            expected_filename("linux", "firefox-aurora-latest", "51.0a2").unwrap(),
            "firefox-51.0a2.en-US.linux-i686.tar.bz2"
        );
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let err = expected_filename("solaris", "firefox-latest", "49.0").unwrap_err();
        assert_eq!(
            err,
            CheckError::UnsupportedPlatform {
                os: "solaris".to_string(),
                alias: "firefox-latest".to_string(),
                version: "49.0".to_string(),
            }
        );
    }

    #[test]
    fn test_release_aliases_never_use_build_names() {
        for platform in Platform::iter() {
            for alias in RELEASE_ALIASES {
                let name = platform.expected_filename(alias, "49.0");
                assert!(!name.contains("en-US.win32.installer"), "{name}");
                assert!(!name.contains("en-US.mac"), "{name}");
                assert!(!name.contains("en-US.linux-i686"), "{name}");
            }
        }
    }

    #[test]
    fn test_every_filename_round_trips_version() {
        for platform in Platform::iter() {
            for alias in RELEASE_ALIASES.iter().chain(PRE_RELEASE_ALIASES) {
                for version in ["49.0", "49.0b10", "58.0a1", "52.0esr", "49.0.1"] {
                    let name = platform.expected_filename(alias, version);
                    assert_eq!(
                        version_from_filename(&name).as_deref(),
                        Some(version),
                        "{platform} {alias} {name}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_pre_release_filenames_match_channel_pattern() {
        for alias in PRE_RELEASE_ALIASES {
            assert!(Platform::Win
                .expected_filename(alias, "58.0a1")
                .ends_with(".en-US.win32.installer.exe"));
            assert!(Platform::Osx
                .expected_filename(alias, "58.0a1")
                .ends_with(".en-US.mac.dmg"));
            assert!(Platform::Linux64
                .expected_filename(alias, "58.0a1")
                .ends_with(".en-US.linux-i686.tar.bz2"));
        }
    }

    #[test]
    fn test_expected_filename_is_deterministic() {
        let a = expected_filename("osx", "firefox-latest", "49.0").unwrap();
        let b = expected_filename("osx", "firefox-latest", "49.0").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_version_from_cdn_url() {
        let url = "https://download-installer.cdn.mozilla.net/pub/firefox/releases/39.0/win64/en-US/Firefox%20Setup%2039.0.exe";
        assert_eq!(version_from_filename(url).as_deref(), Some("39.0"));
        assert_eq!(version_from_filename("https://x/pub/index.html"), None);
    }

    #[test]
    fn test_platform_query_round_trip() {
        for platform in Platform::iter() {
            assert_eq!(Platform::from_query(platform.as_str()), Some(platform));
        }
        assert_eq!(Platform::from_query("stella"), None);
    }

    #[test]
    fn test_japanese_locale_on_mac() {
        assert_eq!(effective_locale("ja", Platform::Osx), "ja-JP-mac");
        for platform in Platform::iter().filter(|p| *p != Platform::Osx) {
            assert_eq!(effective_locale("ja", platform), "ja");
        }
        assert_eq!(effective_locale("de", Platform::Osx), "de");
    }

    #[test]
    fn test_channel_from_alias() {
        assert_eq!(Channel::from_alias("firefox-nightly-latest"), Channel::PreRelease);
        assert_eq!(Channel::from_alias("firefox-aurora-latest"), Channel::PreRelease);
        assert_eq!(Channel::from_alias("firefox-beta-latest"), Channel::Release);
    }
}
