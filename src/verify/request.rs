//! Request parameters for a single bouncer check.

use std::fmt;

use reqwest::header::{HeaderName, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use reqwest::Url;

use crate::config::DEFAULT_USER_AGENT;
use crate::filename::Platform;

/// Value sent as the `os` query parameter.
///
/// Checks normally use a supported platform; the invalid-query check sends
/// a value bouncer does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsParam {
    Supported(Platform),
    Unrecognized(String),
}

impl OsParam {
    pub fn as_str(&self) -> &str {
        match self {
            OsParam::Supported(platform) => platform.as_str(),
            OsParam::Unrecognized(os) => os,
        }
    }
}

impl From<Platform> for OsParam {
    fn from(platform: Platform) -> Self {
        OsParam::Supported(platform)
    }
}

/// Parameters of one bouncer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    pub product_alias: String,
    pub locale: String,
    pub os: OsParam,
    pub user_agent: String,
}

impl RequestParameters {
    pub fn new(product_alias: impl Into<String>, locale: impl Into<String>, os: impl Into<OsParam>) -> Self {
        Self {
            product_alias: product_alias.into(),
            locale: locale.into(),
            os: os.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Query pairs in the order bouncer documents them.
    pub fn query_pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("product", self.product_alias.as_str()),
            ("lang", self.locale.as_str()),
            ("os", self.os.as_str()),
        ]
    }

    /// Form-encoded query string, e.g. `product=firefox-latest&lang=en-US&os=win`.
    pub fn encoded_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// `base` with this request's query string in place of any existing one.
    pub fn request_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(Some(&self.encoded_query()));
        url
    }

    /// Headers sent on every hop of the request.
    pub(crate) fn headers(&self) -> [(HeaderName, &str); 3] {
        [
            (USER_AGENT, self.user_agent.as_str()),
            (ACCEPT_LANGUAGE, self.locale.as_str()),
            (CONNECTION, "close"),
        ]
    }

    pub(crate) fn apply_to_request_builder(
        &self,
        mut builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        for (name, value) in self.headers() {
            builder = builder.header(name, value);
        }
        builder
    }
}

impl fmt::Display for RequestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{product: {}, lang: {}, os: {}, user-agent: {}}}",
            self.product_alias,
            self.locale,
            self.os.as_str(),
            self.user_agent
        )
    }
}
