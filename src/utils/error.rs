//! Error handling for texgrab
//!
//! Locating and extracting never fail; these errors belong to the layers
//! around the core (selectors, clipboard, configuration, file input).

use thiserror::Error;

/// Error type for everything outside the locate/extract core
#[derive(Debug, Clone, Error)]
pub enum GrabError {
    /// A CSS selector could not be parsed
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
    /// The clipboard rejected the write (permission, focus, missing backend)
    #[error("Clipboard error: {message}")]
    Clipboard { message: String },
    /// IO error (for file operations)
    #[error("IO error: {message}")]
    Io { message: String },
    /// Config file could not be read or written
    #[error("Config error: {message}")]
    Config { message: String },
    /// Nothing under the given node classifies as a formula
    #[error("No formula found{}", for_context(.context))]
    NoFormula { context: Option<String> },
}

impl From<std::io::Error> for GrabError {
    fn from(err: std::io::Error) -> Self {
        GrabError::Io {
            message: err.to_string(),
        }
    }
}

fn for_context(context: &Option<String>) -> String {
    context
        .as_deref()
        .map(|c| format!(" for {}", c))
        .unwrap_or_default()
}

/// Result type for operations that can fail
pub type GrabResult<T> = Result<T, GrabError>;

// Convenience constructors for errors
impl GrabError {
    pub fn selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        GrabError::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        GrabError::Clipboard {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GrabError::Config {
            message: message.into(),
        }
    }

    pub fn no_formula() -> Self {
        GrabError::NoFormula { context: None }
    }

    pub fn no_formula_for(context: impl Into<String>) -> Self {
        GrabError::NoFormula {
            context: Some(context.into()),
        }
    }
}
