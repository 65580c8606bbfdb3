//! Page entity and validated title token

use std::fmt;

use thiserror::Error;

/// Rejected title: empty or containing characters outside `[a-zA-Z0-9]`
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid page title: {0:?}")]
pub struct InvalidTitle(pub String);

/// Page title, guaranteed non-empty and ASCII alphanumeric.
///
/// A `Title` is safe to splice into a filename or a redirect target: it can't
/// contain path separators, dots, or anything that needs escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, InvalidTitle> {
        if is_valid_title(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidTitle(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check the title charset `[a-zA-Z0-9]+`
pub fn is_valid_title(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// One wiki article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub const fn new(title: Title, body: Vec<u8>) -> Self {
        Self { title, body }
    }

    /// Page that doesn't exist on disk yet
    pub const fn empty(title: Title) -> Self {
        Self {
            title,
            body: Vec::new(),
        }
    }
}
