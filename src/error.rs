use std::fmt::{Display, Formatter};

/// Failure of a user + repositories lookup.
///
/// A user that does not exist is not an error: it comes back inside a
/// successful result with the not-found marker set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure or non-success HTTP status on either request.
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
    },
    /// A response body did not decode into the expected shape.
    Parse { url: String, message: String },
}

impl FetchError {
    pub fn transport(url: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.to_string(),
            status,
            message: message.into(),
        }
    }

    pub fn parse(url: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.to_string(),
            message: message.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Parse { url, .. } => url,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport {
                url,
                status: Some(status),
                message,
            } => write!(f, "GET {url} returned HTTP {status}: {message}"),
            Self::Transport {
                url,
                status: None,
                message,
            } => write!(f, "GET {url} failed: {message}"),
            Self::Parse { url, message } => {
                write!(f, "unexpected response body from {url}: {message}")
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Why a raw search string was refused before any request was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooLong { len: usize, max: usize },
    InvalidCharacter(char),
    /// `.` and `..` would resolve to a different path once appended to the base URL.
    LeadingDot,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "enter a GitHub username"),
            Self::TooLong { len, max } => {
                write!(f, "username is {len} characters long, at most {max} allowed")
            }
            Self::InvalidCharacter(c) if c.is_whitespace() => {
                write!(f, "username must not contain whitespace")
            }
            Self::InvalidCharacter(c) => write!(f, "username must not contain '{c}'"),
            Self::LeadingDot => write!(f, "username must not start with '.'"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_includes_status() {
        let err = FetchError::transport("https://api.github.com/users/a/repos", Some(500), "boom");
        assert_eq!(
            err.to_string(),
            "GET https://api.github.com/users/a/repos returned HTTP 500: boom"
        );
        assert!(err.is_transport());
    }

    #[test]
    fn validation_messages() {
        assert_eq!(ValidationError::Empty.to_string(), "enter a GitHub username");
        assert_eq!(
            ValidationError::InvalidCharacter(' ').to_string(),
            "username must not contain whitespace"
        );
        assert_eq!(
            ValidationError::InvalidCharacter('/').to_string(),
            "username must not contain '/'"
        );
    }
}
