//! Search input checks applied before a lookup is issued.

use crate::error::ValidationError;

/// Longest search string the prompt accepts.
pub const MAX_USERNAME_LEN: usize = 50;

/// Characters that would change the request path or query once appended to the base URL.
const FORBIDDEN: &[char] = &['/', '?', '#', '%', '\\'];

/// Trims `raw` and returns the username to look up.
///
/// Existence is left to the API: anything that is non-empty, short enough
/// and safe to append to the base URL passes.
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(ValidationError::Empty);
    }

    let len = username.chars().count();
    if len > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            len,
            max: MAX_USERNAME_LEN,
        });
    }

    if username.starts_with('.') {
        return Err(ValidationError::LeadingDot);
    }

    if let Some(c) = username
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(c))
    {
        return Err(ValidationError::InvalidCharacter(c));
    }

    Ok(username.to_string())
}
