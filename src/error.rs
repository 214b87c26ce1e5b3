use thiserror::Error;

/// Coarse failure class, for callers that decide per-kind whether a
/// document is worth retrying with a different layout profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An expected named subtree is absent from the page.
    Structural,
    /// A located block does not follow the expected text convention.
    Format,
}

/// Why extraction of a document failed. Carries the endpoint index where
/// one is known, so a caller can report precisely without a backtrace.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document tree too shallow: no <body> to descend into")]
    MissingBody,

    #[error("no child of <body> carries class `{class}`")]
    MissingContainer { class: &'static str },

    #[error("endpoint {endpoint}: no `{class}` subtree")]
    MissingSubtree {
        endpoint: usize,
        class: &'static str,
    },

    #[error(
        "endpoint {endpoint}: url line `{line}` splits into {found} tokens, expected `[METHOD] path`"
    )]
    UrlTokenCount {
        endpoint: usize,
        line: String,
        found: usize,
    },

    #[error("endpoint {endpoint}: unparseable url `{url}`")]
    UrlParse {
        endpoint: usize,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingBody | Self::MissingContainer { .. } | Self::MissingSubtree { .. } => {
                ErrorKind::Structural
            }
            Self::UrlTokenCount { .. } | Self::UrlParse { .. } => ErrorKind::Format,
        }
    }
}
