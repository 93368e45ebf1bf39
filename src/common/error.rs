use thiserror::Error;

/// Result type for jago operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the jago translator
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Structural error: expected node kind `{expected}`, found `{found}`")]
    Structural { expected: String, found: String },

    #[error("Lowering error: {message}")]
    Lower { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal translator error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a parse error for a named input file
    pub fn parse_error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a structural error, signalling a grammar-version mismatch
    pub fn structural(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Structural {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a lowering error
    pub fn lower_error(message: impl Into<String>) -> Self {
        Self::Lower { message: message.into() }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}
