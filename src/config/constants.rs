//! Configuration constants.
//!
//! Timeouts, remote endpoints, default headers and the CDN host allow-list
//! used when checking bouncer redirects.

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Maximum number of redirect hops to follow when resolving a final destination.
/// Bouncer answers with a single 302; the CDN may add one or two more.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Default User-Agent sent with every check.
///
/// An old desktop Firefox on macOS. It is deliberately not a Windows XP/Vista
/// or Windows 7 agent, since bouncer rewrites products for those.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.7; rv:10.0.1) Gecko/20100101 Firefox/10.0.1";

/// IE6 on Windows XP (NT 5.1).
pub const USER_AGENT_IE6_WINXP: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1)";
/// IE6 on Windows XP x64 / Server 2003 (NT 5.2).
pub const USER_AGENT_IE6_WINXP_X64: &str =
    "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.2; SV1)";

/// Base URL of release engineering's product-details service.
pub const PRODUCT_DETAILS_BASE_URL: &str = "https://product-details.mozilla.org/1.0/";
/// Current version per releng product key.
pub const FIREFOX_VERSIONS_PATH: &str = "firefox_versions.json";
/// Locale -> version -> platform build information.
pub const FIREFOX_PRIMARY_BUILDS_PATH: &str = "firefox_primary_builds.json";

/// Product label checked by the `product` scenario when none is given.
pub const DEFAULT_PRODUCT: &str = "firefox-stub";
/// Locale used for alias and product checks.
pub const DEFAULT_LOCALE: &str = "en-US";

/// CDN hosts bouncer is allowed to hand out.
pub const DEFAULT_CDN_HOSTS: &[&str] = &[
    "download-installer.cdn.mozilla.net",
    "download.cdn.mozilla.net",
    "download-sha1.cdn.mozilla.net",
];

/// Product suffixes that must all collapse to the ESR build for IE6 on XP.
pub const WINXP_PRODUCT_SUFFIXES: &[&str] = &[
    "stub",
    "latest",
    "sha1",
    "esr-latest",
    "esr-stub",
    "beta",
    "beta-latest",
    "beta-sha",
    "beta-stub",
    "38.5.1esr",
    "40.0.0esr",
    "58.0.0esr",
    "42.0",
    "43.0.1",
    "49.0b8",
    "49.0b8-ssl",
    "100.0",
    "cats",
];
