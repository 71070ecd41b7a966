use serde::{Deserialize, Serialize};

/// Content type used for every error body.
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 7807 problem document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }
}
