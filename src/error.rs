use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl ValidatorError {
    /// Short category name used in diagnostics.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileNotFound(_) | Self::FileRead { .. } => "File",
            Self::InvalidPattern { .. } | Self::InvalidGlob { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
            Self::Server(_) => "Server",
        }
    }

    /// True for errors caused by the validation target rather than the tool setup.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::FileRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
