//! Error types and handling infrastructure for JSON/spreadsheet conversion

use std::fmt;
use std::path::PathBuf;

/// Coarse classification of a failure, independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    Syntax,
    Schema,
    Format,
    Encode,
    Decode,
    Clipboard,
    Download,
    InputTooLarge,
    Io,
    Configuration,
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Empty input")]
    EmptyInput,

    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Unrecognized spreadsheet format: {message}")]
    Format { message: String },

    #[error("Spreadsheet encoding failed: {message}")]
    Encode { message: String },

    #[error("Spreadsheet decoding failed: {message}")]
    Decode { message: String },

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    #[error("Download failed: {message}")]
    Download {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl ConvertError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    pub fn download(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Download {
            message: message.into(),
            path,
        }
    }

    pub fn io(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::Schema { .. } => ErrorKind::Schema,
            Self::Format { .. } => ErrorKind::Format,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Clipboard { .. } => ErrorKind::Clipboard,
            Self::Download { .. } => ErrorKind::Download,
            Self::InputTooLarge { .. } => ErrorKind::InputTooLarge,
            Self::Io { .. } => ErrorKind::Io,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "Input is empty".to_string(),
            Self::Syntax(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "JSON parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("JSON parse error: {}", err.message)
                }
            }
            Self::InputTooLarge { size, limit } => {
                format!("Input too large: {} bytes (limit: {} bytes)", size, limit)
            }
            Self::Download {
                message,
                path: Some(path),
            } => format!("Could not write {}: {}", path.display(), message),
            _ => self.to_string(),
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
