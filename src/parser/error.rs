//! Error types for layout decoding.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Where in the document a structural problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The document as a whole
    Document,
    /// A top-level element (metadata object or row), 0-indexed
    Element(usize),
    /// A token inside a row, both 0-indexed
    Token {
        /// Top-level element index of the row
        element: usize,
        /// Token index within the row
        token: usize,
    },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document root"),
            Self::Element(index) => write!(f, "element {index}"),
            Self::Token { element, token } => write!(f, "element {element}, token {token}"),
        }
    }
}

/// Errors that abort decoding. No partial keyboard is returned with any of them.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The layout file could not be read.
    #[error("Failed to read layout file {}: {source}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The text is not a well-formed document.
    #[error("Layout is not well-formed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The document parsed but does not have the layout shape.
    #[error("Invalid layout structure at {location}: {message}")]
    Structural {
        /// Offending element or token
        location: Location,
        /// What was wrong
        message: String,
    },
}

impl ParseError {
    /// Creates a structural error.
    pub fn structural(location: Location, message: impl Into<String>) -> Self {
        Self::Structural {
            location,
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the document's content rather than I/O.
    #[must_use]
    pub const fn is_content_error(&self) -> bool {
        matches!(self, Self::Syntax(_) | Self::Structural { .. })
    }
}
