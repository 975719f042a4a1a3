//! Error handling.
//!
//! Two families of errors:
//! - **Initialization** errors: logger or HTTP client could not be set up
//! - **Check** errors: a single check case failed (data source down, lookup
//!   miss, unknown platform, network failure, or a mismatched response)

mod types;

// Re-export public API
pub use types::{CheckError, InitializationError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message_names_url() {
        let err = CheckError::RequestFailed {
            url: "http://bouncer/?product=firefox-latest".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Failing URL: http://bouncer/?product=firefox-latest"));
        assert!(msg.contains("Error message: connection refused"));
    }

    #[test]
    fn test_unsupported_platform_message_names_triple() {
        let err = CheckError::UnsupportedPlatform {
            os: "solaris".to_string(),
            alias: "firefox-latest".to_string(),
            version: "49.0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("solaris"));
        assert!(msg.contains("firefox-latest"));
        assert!(msg.contains("49.0"));
    }

    #[test]
    fn test_assertion_failure_message_passthrough() {
        let err = CheckError::AssertionFailure {
            message: "Failed on http://x/".to_string(),
        };
        assert_eq!(err.to_string(), "Failed on http://x/");
    }

    #[test]
    fn test_kind_labels_are_distinct() {
        let errors = [
            CheckError::Unavailable {
                url: String::new(),
                reason: String::new(),
            },
            CheckError::MissingProduct { key: String::new() },
            CheckError::UnsupportedPlatform {
                os: String::new(),
                alias: String::new(),
                version: String::new(),
            },
            CheckError::RequestFailed {
                url: String::new(),
                reason: String::new(),
            },
            CheckError::AssertionFailure {
                message: String::new(),
            },
        ];
        let mut kinds: Vec<&str> = errors.iter().map(CheckError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), 5);
    }
}
