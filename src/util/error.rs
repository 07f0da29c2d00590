// ElasChat - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation: every failure is a variant that
// carries the offending input and, where one exists, its source error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ElasChat operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ElasChatError {
    /// A display transform rejected its input.
    Format(FormatError),

    /// Auth session operation failed.
    Session(SessionError),

    /// Key-value storage failed.
    Storage(StorageError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for ElasChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "Format error: {e}"),
            Self::Session(e) => write!(f, "Session error: {e}"),
            Self::Storage(e) => write!(f, "Storage error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ElasChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::Session(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

/// Errors raised by the display transforms.
#[derive(Debug)]
pub enum FormatError {
    /// The timestamp text is not a parseable date-time.
    InvalidTimestamp {
        raw: String,
        source: chrono::ParseError,
    },

    /// A count below zero was passed to the compact formatter.
    InvalidCount { value: i64 },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp { raw, source } => {
                write!(f, "Invalid timestamp '{raw}': {source}")
            }
            Self::InvalidCount { value } => {
                write!(f, "Invalid count {value}: counts must not be negative")
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTimestamp { source, .. } => Some(source),
            Self::InvalidCount { .. } => None,
        }
    }
}

impl From<FormatError> for ElasChatError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// Errors related to the auth session lifecycle.
#[derive(Debug)]
pub enum SessionError {
    /// A required form field was blank.
    MissingField { field: &'static str },

    /// Login attempted with no stored user record.
    NoAccount,

    /// An operation that needs a signed-in user ran while signed out.
    NotSignedIn,

    /// Bio exceeds the maximum length.
    BioTooLong { length: usize, max: usize },

    /// The underlying key-value store failed.
    Storage(StorageError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "Please fill in all required fields ('{field}' is empty)")
            }
            Self::NoAccount => write!(f, "No account found. Please sign up first."),
            Self::NotSignedIn => write!(f, "No user is signed in"),
            Self::BioTooLong { length, max } => {
                write!(f, "Bio is {length} characters, maximum is {max}")
            }
            Self::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<SessionError> for ElasChatError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

/// Errors related to the on-disk key-value store.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// A stored value could not be encoded or decoded.
    Json {
        key: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Json { key, source } => {
                write!(f, "Cannot encode or decode value for '{key}': {source}")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<StorageError> for ElasChatError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// `load_config` never fails outright; these are rendered into its warning
/// list so the caller sees one message per rejected value.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// `[display] date_format` is not a valid strftime pattern.
    InvalidDateFormat { format: String },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::InvalidDateFormat { format } => {
                write!(
                    f,
                    "Config 'display.date_format' = '{format}' is not a valid strftime pattern"
                )
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ElasChatError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ElasChat results.
pub type Result<T> = std::result::Result<T, ElasChatError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_no_account_message_matches_login_prompt() {
        let err = SessionError::NoAccount;
        assert_eq!(err.to_string(), "No account found. Please sign up first.");
    }

    #[test]
    fn test_storage_error_chains_through_session_and_top_level() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let storage = StorageError::Io {
            path: PathBuf::from("/tmp/storage.json"),
            operation: "write",
            source: io,
        };
        let top: ElasChatError = SessionError::from(storage).into();

        let session = top.source().expect("top-level error has a source");
        let storage = session.source().expect("session error wraps storage");
        assert!(storage.to_string().contains("write"));
        assert!(storage.source().is_some());
    }

    #[test]
    fn test_invalid_count_has_no_source() {
        let err = FormatError::InvalidCount { value: -5 };
        assert!(err.source().is_none());
        assert!(err.to_string().contains("-5"));
    }
}
