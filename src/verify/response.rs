//! Observed responses and failure diagnostics.

use reqwest::Url;

use crate::filename::version_from_filename;
use crate::verify::redirects;
use crate::verify::request::RequestParameters;

/// What came back for one request, after any redirects that were followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedResponse {
    pub status_code: u16,
    pub url: Url,
    /// Response headers in arrival order; values that are not valid UTF-8 are
    /// shown lossily.
    pub headers: Vec<(String, String)>,
    /// Every URL requested, starting with the bouncer request.
    pub redirect_chain: Vec<Url>,
    /// Resolved `Location` of a redirect response.
    pub location: Option<Url>,
}

impl ObservedResponse {
    pub(crate) fn from_response(response: &reqwest::Response, redirect_chain: Vec<Url>) -> Self {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let location = if response.status().is_redirection() {
            redirects::location(response, response.url())
        } else {
            None
        };
        Self {
            status_code: response.status().as_u16(),
            url: response.url().clone(),
            headers,
            redirect_chain,
            location,
        }
    }

    /// The URL a check is judged against: the redirect target for a
    /// redirect response, the response URL otherwise.
    pub fn target(&self) -> &Url {
        match &self.location {
            Some(location) if (300..400).contains(&self.status_code) => location,
            _ => &self.url,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Response URL and headers, one header per line.
    pub fn info(&self) -> String {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        match &self.location {
            Some(location) => format!(
                "Response URL: {}\n Redirect target: {location}\n Response Headers:\n {}",
                self.url, headers
            ),
            None => format!("Response URL: {}\n Response Headers:\n {}", self.url, headers),
        }
    }
}

/// Builds the message for a failed check.
///
/// Contains everything needed to reproduce the request by hand: the request
/// URL with its query, the parameters and user agent, the final response URL,
/// the version found in it, and every response header.
pub fn failure_message(
    reason: &str,
    request_url: &Url,
    params: &RequestParameters,
    observed: &ObservedResponse,
) -> String {
    let observed_version = version_from_filename(observed.target().as_str())
        .unwrap_or_else(|| "none".to_string());
    let chain = observed
        .redirect_chain
        .iter()
        .map(Url::as_str)
        .collect::<Vec<_>>()
        .join(" -> ");
    format!(
        "{reason}\nFailed on {request_url} \nUsing {params}.\n Status: {}\n Redirect chain: {chain}\n Observed version: {observed_version}\n {}",
        observed.status_code,
        observed.info()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::Platform;

    fn observed() -> ObservedResponse {
        let url = Url::parse(
            "https://download-installer.cdn.mozilla.net/pub/firefox/releases/49.0/mac/en-US/Firefox%2049.0.dmg",
        )
        .unwrap();
        ObservedResponse {
            status_code: 200,
            url: url.clone(),
            headers: vec![
                ("content-type".to_string(), "application/x-apple-diskimage".to_string()),
                ("x-cache".to_string(), "Hit from cloudfront".to_string()),
            ],
            redirect_chain: vec![Url::parse("https://bouncer.test/?product=firefox-latest").unwrap(), url],
            location: None,
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = observed();
        assert_eq!(response.header("X-Cache"), Some("Hit from cloudfront"));
        assert_eq!(response.header("location"), None);
    }

    #[test]
    fn test_info_lists_every_header() {
        let info = observed().info();
        assert!(info.starts_with("Response URL: https://download-installer.cdn.mozilla.net/"));
        assert!(info.contains("content-type: application/x-apple-diskimage"));
        assert!(info.contains("x-cache: Hit from cloudfront"));
    }

    #[test]
    fn test_failure_message_has_full_context() {
        let params = RequestParameters::new("firefox-latest", "en-US", Platform::Osx);
        let request_url = params.request_url(&Url::parse("https://bouncer.test/").unwrap());
        let msg = failure_message("wrong filename", &request_url, &params, &observed());
        assert!(msg.starts_with("wrong filename"));
        assert!(msg.contains("Failed on https://bouncer.test/?product=firefox-latest&lang=en-US&os=osx"));
        assert!(msg.contains("Using {product: firefox-latest"));
        assert!(msg.contains("Observed version: 49.0"));
        assert!(msg.contains("x-cache: Hit from cloudfront"));
        assert!(msg.contains(" -> https://download-installer.cdn.mozilla.net/"));
    }

    #[test]
    fn test_target_is_location_for_redirects() {
        let bouncer = Url::parse("https://bouncer.test/?product=firefox-latest&lang=en-US&os=osx").unwrap();
        let cdn = Url::parse("https://download.cdn.mozilla.net/pub/firefox/releases/49.0/mac/en-US/Firefox%2049.0.dmg").unwrap();
        let redirect = ObservedResponse {
            status_code: 302,
            url: bouncer.clone(),
            headers: vec![("location".to_string(), cdn.to_string())],
            redirect_chain: vec![bouncer.clone()],
            location: Some(cdn.clone()),
        };
        assert_eq!(redirect.target(), &cdn);
        assert!(redirect.info().contains("Redirect target: https://download.cdn.mozilla.net/"));

        let final_response = ObservedResponse {
            status_code: 200,
            location: None,
            ..redirect
        };
        assert_eq!(final_response.target(), &bouncer);
    }
}
