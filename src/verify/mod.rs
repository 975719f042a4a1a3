//! Redirect verification.
//!
//! A [`RedirectVerifier`] sends one request to bouncer and compares what came
//! back with an [`ExpectedOutcome`]. Every mismatch is reported as
//! [`CheckError::AssertionFailure`] with enough context to rerun the request
//! by hand; network failures are [`CheckError::RequestFailed`].

mod redirects;
mod request;
mod response;

use std::sync::Arc;

use log::debug;
use reqwest::{Method, Url};

use crate::config::MAX_REDIRECT_HOPS;
use crate::error_handling::{CheckError, InitializationError};

pub use request::{OsParam, RequestParameters};
pub use response::{failure_message, ObservedResponse};

/// How far to chase redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowRedirects {
    /// Stop at bouncer's own response; its `Location` is the intermediate target.
    Never,
    /// Follow the chain to the final destination.
    All,
}

/// What a check expects to observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedOutcome {
    pub status: u16,
    /// Acceptable schemes of the final URL.
    pub schemes: Vec<String>,
    /// Acceptable hosts of the final URL.
    pub hosts: Vec<String>,
    /// Substring the final URL must contain, usually the download filename.
    pub filename_fragment: Option<String>,
}

impl ExpectedOutcome {
    /// A successful download from one of `hosts`, over http or https.
    pub fn download(hosts: &[String], filename_fragment: Option<String>) -> Self {
        Self {
            status: 200,
            schemes: vec!["https".to_string(), "http".to_string()],
            hosts: hosts.to_vec(),
            filename_fragment,
        }
    }

    pub fn with_schemes(mut self, schemes: &[&str]) -> Self {
        self.schemes = schemes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// Issues requests against one bouncer endpoint.
#[derive(Debug, Clone)]
pub struct RedirectVerifier {
    client: Arc<reqwest::Client>,
    base_url: Url,
    method: Method,
    follow: FollowRedirects,
}

impl RedirectVerifier {
    /// `client` must have automatic redirects disabled
    /// (see `initialization::init_redirect_client`).
    pub fn new(client: Arc<reqwest::Client>, base_url: &str) -> Result<Self, InitializationError> {
        let base_url = Url::parse(base_url).map_err(|e| InitializationError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            base_url,
            method: Method::HEAD,
            follow: FollowRedirects::All,
        })
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_follow(mut self, follow: FollowRedirects) -> Self {
        self.follow = follow;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends the request described by `params` and records the response.
    ///
    /// # Errors
    ///
    /// `CheckError::RequestFailed` naming the URL whose request failed.
    pub async fn issue(&self, params: &RequestParameters) -> Result<ObservedResponse, CheckError> {
        let request_url = params.request_url(&self.base_url);
        debug!("{} {}", self.method, request_url);

        let result = match self.follow {
            FollowRedirects::Never => {
                redirects::send(&self.client, &self.method, &request_url, params)
                    .await
                    .map(|response| (response, vec![request_url.clone()]))
            }
            FollowRedirects::All => {
                redirects::follow_redirect_chain(
                    &self.client,
                    &self.method,
                    request_url.clone(),
                    params,
                    MAX_REDIRECT_HOPS,
                )
                .await
            }
        };

        match result {
            Ok((response, chain)) => Ok(ObservedResponse::from_response(&response, chain)),
            Err((failed_url, error)) => Err(CheckError::RequestFailed {
                url: failed_url.to_string(),
                reason: error_chain(&error),
            }),
        }
    }

    /// Requests `params` and checks the response against `expected`.
    pub async fn verify(
        &self,
        expected: &ExpectedOutcome,
        params: &RequestParameters,
    ) -> Result<(), CheckError> {
        let observed = self.issue(params).await?;
        let request_url = params.request_url(&self.base_url);
        check(expected, &request_url, params, &observed)
    }

    /// Checks bouncer's answer to parameters it cannot serve: a 404 from
    /// bouncer itself, with the query string left exactly as sent.
    pub async fn verify_query_echo(&self, params: &RequestParameters) -> Result<(), CheckError> {
        let observed = self.issue(params).await?;
        let request_url = params.request_url(&self.base_url);
        let fail = |reason: String| CheckError::AssertionFailure {
            message: failure_message(&reason, &request_url, params, &observed),
        };

        if observed.status_code != 404 {
            return Err(fail(format!(
                "Expected status 404, got {}.",
                observed.status_code
            )));
        }
        if observed.url.scheme() != self.base_url.scheme() {
            return Err(fail(format!(
                "Failed to redirect to the correct scheme: expected {}, got {}.",
                self.base_url.scheme(),
                observed.url.scheme()
            )));
        }
        if netloc(&observed.url) != netloc(&self.base_url) {
            return Err(fail(format!(
                "Expected response from {}, got {}.",
                netloc(&self.base_url),
                netloc(&observed.url)
            )));
        }
        let expected_query = params.encoded_query();
        if observed.url.query() != Some(expected_query.as_str()) {
            return Err(fail(format!(
                "Expected query {expected_query:?}, got {:?}.",
                observed.url.query().unwrap_or("")
            )));
        }
        Ok(())
    }
}

/// Compares an observed response with the expectation.
///
/// Scheme, host and filename are read from [`ObservedResponse::target`], so
/// a redirect observed with [`FollowRedirects::Never`] is judged by where it
/// points.
pub fn check(
    expected: &ExpectedOutcome,
    request_url: &Url,
    params: &RequestParameters,
    observed: &ObservedResponse,
) -> Result<(), CheckError> {
    let fail = |reason: String| CheckError::AssertionFailure {
        message: failure_message(&reason, request_url, params, observed),
    };

    if observed.status_code != expected.status {
        return Err(fail(format!(
            "Expected status {}, got {}.",
            expected.status, observed.status_code
        )));
    }

    let target = observed.target();
    let scheme = target.scheme();
    if !expected.schemes.iter().any(|s| s == scheme) {
        return Err(fail(format!(
            "Failed to redirect to the correct scheme: {scheme} not in {:?}.",
            expected.schemes
        )));
    }

    let host = target.host_str().unwrap_or("");
    if !expected.hosts.iter().any(|h| h == host) {
        return Err(fail(format!(
            "Failed to redirect to a known CDN host: {host:?} not in {:?}.",
            expected.hosts
        )));
    }

    if let Some(fragment) = &expected.filename_fragment {
        if !target.as_str().contains(fragment.as_str()) {
            return Err(fail(format!(
                "Expected {fragment:?} in the response URL."
            )));
        }
    }

    Ok(())
}

/// `host[:port]` as written in the URL.
fn netloc(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

/// The error and all of its sources, outermost first.
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
