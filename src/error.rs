//! Error handling and custom error types
//!
//! Every failure surfaced by the client falls into one of a handful of
//! categories so callers can decide what to do at the call site.

use serde::Serialize;
use thiserror::Error;

/// Longest slice of a response body echoed in an error's `Display` output.
const SNIPPET_LEN: usize = 512;

/// Structured error object returned by a remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
    pub content_filtered: bool,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error calling {model}: {source}")]
    Transport {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{model} returned status {status}: {}", snippet(.body))]
    RemoteService {
        model: String,
        status: u16,
        detail: Option<RemoteErrorDetail>,
        body: String,
    },

    #[error("Failed to parse {model} response: {message} (payload: {})", snippet(.payload))]
    Parse {
        model: String,
        message: String,
        payload: String,
    },

    #[error("Request to {model} was cancelled")]
    Cancelled { model: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn transport(model: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            model: model.to_string(),
            source,
        }
    }

    pub(crate) fn parse(model: &str, message: impl Into<String>, payload: &[u8]) -> Self {
        Error::Parse {
            model: model.to_string(),
            message: message.into(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }

    /// Whether the HTTP engine may issue another attempt after this failure.
    ///
    /// Only network/timeout failures, 429 and 5xx qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { .. } => true,
            Error::RemoteService { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }

    /// HTTP status of the failed call, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteService { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_content_filtered(&self) -> bool {
        matches!(
            self,
            Error::RemoteService {
                detail: Some(RemoteErrorDetail {
                    content_filtered: true,
                    ..
                }),
                ..
            }
        )
    }
}

fn snippet(text: &str) -> &str {
    if text.len() <= SNIPPET_LEN {
        return text;
    }
    let mut end = SNIPPET_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: u16) -> Error {
        Error::RemoteService {
            model: "gpt-image-1".to_string(),
            status,
            detail: None,
            body: String::new(),
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(remote(429).is_retryable());
        assert!(remote(500).is_retryable());
        assert!(remote(503).is_retryable());
        assert!(!remote(400).is_retryable());
        assert!(!remote(404).is_retryable());
    }

    #[test]
    fn test_validation_and_parse_are_fatal() {
        assert!(!Error::Validation("bad".to_string()).is_retryable());
        assert!(!Error::parse("florence", "missing field", b"{}").is_retryable());
        assert!(!Error::Configuration("bad".to_string()).is_retryable());
    }

    #[test]
    fn test_display_includes_model_and_status() {
        let err = Error::RemoteService {
            model: "dall-e-3".to_string(),
            status: 400,
            detail: None,
            body: "{\"error\":\"bad size\"}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("dall-e-3"));
        assert!(text.contains("400"));
        assert!(text.contains("bad size"));
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let body = "é".repeat(SNIPPET_LEN);
        let cut = snippet(&body);
        assert!(cut.len() <= SNIPPET_LEN);
        assert!(body.starts_with(cut));
    }

    #[test]
    fn test_content_filter_flag() {
        let err = Error::RemoteService {
            model: "dall-e-3".to_string(),
            status: 400,
            detail: Some(RemoteErrorDetail {
                code: Some("content_policy_violation".to_string()),
                message: None,
                content_filtered: true,
            }),
            body: String::new(),
        };
        assert!(err.is_content_filtered());
        assert!(!remote(400).is_content_filtered());
    }
}
