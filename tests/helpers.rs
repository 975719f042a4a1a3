// Shared test helpers: a fake product-details service and a fake bouncer.
//
// Both are mounted on wiremock servers so tests can drive the full
// fetch -> resolve -> redirect -> CDN path without network access.

use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use bouncer_e2e::expected_filename;

/// Product-details `firefox_versions.json` used across tests.
#[allow(dead_code)]
pub fn firefox_versions() -> serde_json::Value {
    json!({
        "FIREFOX_AURORA": "51.0a2",
        "FIREFOX_ESR": "45.4.0esr",
        "FIREFOX_ESR_NEXT": "52.0esr",
        "FIREFOX_NIGHTLY": "52.0a1",
        "LATEST_FIREFOX_DEVEL_VERSION": "50.0b1",
        "LATEST_FIREFOX_OLDER_VERSION": "3.6.28",
        "LATEST_FIREFOX_RELEASED_DEVEL_VERSION": "50.0b1",
        "LATEST_FIREFOX_VERSION": "49.0"
    })
}

/// Product-details `firefox_primary_builds.json` used across tests.
#[allow(dead_code)]
pub fn firefox_primary_builds() -> serde_json::Value {
    let platforms = json!({"Windows": {"filesize": 42}, "OS X": {"filesize": 84}, "Linux": {"filesize": 48}});
    json!({
        "en-US": {"49.0": platforms.clone(), "50.0b1": platforms.clone(), "51.0a2": platforms.clone()},
        "ja": {"49.0": platforms.clone(), "45.4.0esr": platforms}
    })
}

/// Mounts both product-details endpoints under `prefix` (e.g. `/pd/`).
#[allow(dead_code)]
pub async fn mount_product_details(
    server: &MockServer,
    prefix: &str,
    versions: serde_json::Value,
    builds: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("{prefix}firefox_versions.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(versions))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{prefix}firefox_primary_builds.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(builds))
        .mount(server)
        .await;
}

/// Answers like bouncer: 302 to a CDN path for known products and platforms,
/// 404 otherwise. IE6 on Windows XP always gets the ESR build.
pub struct FakeBouncer {
    pub cdn_base: String,
}

impl FakeBouncer {
    fn version_for(product: &str) -> Option<String> {
        let version = match product {
            "firefox-latest" | "firefox-stub" => "49.0",
            "firefox-beta-latest" => "50.0b1",
            "firefox-esr-latest" => "52.0esr",
            "firefox-nightly-latest" => "52.0a1",
            "firefox-aurora-latest" => "51.0a2",
            other => return other.strip_prefix("firefox-").map(str::to_string),
        };
        Some(version.to_string())
    }
}

impl Respond for FakeBouncer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query = |key: &str| {
            request
                .url
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default()
        };
        let (mut product, lang, os) = (query("product"), query("lang"), query("os"));

        let user_agent = request
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if user_agent.contains("MSIE 6.0") && user_agent.contains("Windows NT 5.") {
            product = "firefox-esr-latest".to_string();
        }

        let Some(version) = Self::version_for(&product) else {
            return ResponseTemplate::new(404);
        };
        match expected_filename(&os, &product, &version) {
            Ok(filename) => ResponseTemplate::new(302).insert_header(
                "Location",
                format!("{}/pub/firefox/{version}/{os}/{lang}/{filename}", self.cdn_base).as_str(),
            ),
            Err(_) => ResponseTemplate::new(404),
        }
    }
}

/// Mounts the fake bouncer on `/` and a CDN answering 200 under `/pub/`.
#[allow(dead_code)]
pub async fn mount_bouncer_and_cdn(server: &MockServer) {
    Mock::given(path("/"))
        .respond_with(FakeBouncer {
            cdn_base: server.uri(),
        })
        .mount(server)
        .await;
    Mock::given(path_regex(r"^/pub/"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/octet-stream"))
        .mount(server)
        .await;
}

/// A URL on a port nothing listens on.
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}
