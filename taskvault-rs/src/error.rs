//! Error types and exit codes for taskvault.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const TASK_NOT_FOUND: i32 = 2;
    pub const STALE_LOCATOR: i32 = 3;
    pub const CONFIG_ERROR: i32 = 4;
}

/// Main error type for vault and task operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line} out of range in {path} ({len} lines); reload and retry")]
    LineOutOfRange {
        path: PathBuf,
        line: usize,
        len: usize,
    },

    #[error("No task at {0}")]
    TaskNotFound(String),

    #[error("Invalid task locator '{0}' (expected FILE:LINE)")]
    InvalidLocator(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Refusing to rewrite {0}: not valid UTF-8")]
    InvalidEncoding(PathBuf),

    #[error("Task description is empty")]
    EmptyDescription,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl VaultError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::TaskNotFound(_) => exit_code::TASK_NOT_FOUND,
            VaultError::LineOutOfRange { .. } => exit_code::STALE_LOCATOR,
            VaultError::Config(_) | VaultError::TomlParse(_) | VaultError::VaultNotFound(_) => {
                exit_code::CONFIG_ERROR
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Whether the caller should reload before trying again.
    pub fn is_stale_locator(&self) -> bool {
        matches!(self, VaultError::LineOutOfRange { .. })
    }
}

/// Result type alias for taskvault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
        }
    }
}
