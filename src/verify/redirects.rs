//! Redirect chain walking.
//!
//! The redirect client has redirects disabled; this module follows them by
//! hand so each hop carries the check's headers and the chain is recorded.

use log::{trace, warn};
use reqwest::{Method, Url};

use crate::verify::request::RequestParameters;

/// Sends `method` to `start` and follows redirects for at most `max_hops`
/// hops. Returns the last response and every URL requested.
///
/// A redirect status without a usable `Location` ends the walk at that
/// response.
pub(crate) async fn follow_redirect_chain(
    client: &reqwest::Client,
    method: &Method,
    start: Url,
    params: &RequestParameters,
    max_hops: usize,
) -> Result<(reqwest::Response, Vec<Url>), (Url, reqwest::Error)> {
    let mut chain = vec![start.clone()];
    let mut current = start;

    let mut response = send(client, method, &current, params).await?;
    for _ in 0..max_hops {
        if !response.status().is_redirection() {
            break;
        }
        let Some(next) = location(&response, &current) else {
            warn!(
                "Redirect status {} for {} but no usable Location header",
                response.status(),
                current
            );
            break;
        };
        trace!("{} -> {}", current, next);
        chain.push(next.clone());
        current = next;
        response = send(client, method, &current, params).await?;
    }
    Ok((response, chain))
}

/// Sends a single request without following anything.
pub(crate) async fn send(
    client: &reqwest::Client,
    method: &Method,
    url: &Url,
    params: &RequestParameters,
) -> Result<reqwest::Response, (Url, reqwest::Error)> {
    params
        .apply_to_request_builder(client.request(method.clone(), url.clone()))
        .send()
        .await
        .map_err(|e| (url.clone(), e))
}

/// Resolves the `Location` header against the URL that produced it.
pub(crate) fn location(response: &reqwest::Response, current: &Url) -> Option<Url> {
    let loc = response
        .headers()
        .get(reqwest::header::LOCATION)?
        .to_str()
        .ok()?;
    Url::parse(loc).or_else(|_| current.join(loc)).ok()
}
