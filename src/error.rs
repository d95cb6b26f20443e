//! Structured error handling and exit codes.

use serde::Serialize;

use crate::index::IndexError;
use crate::source::SourceError;

/// Exit codes for the hazreg binary.
///
/// - 0: Success
/// - 1: General error (unexpected failure, bad configuration)
/// - 2: Configured spreadsheet or document directory is missing
/// - 3: The document directory holds no PDF files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the command completed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Source not found: the configured input does not exist.
    SourceNotFound = 2,
    /// No documents: the SDS scan found nothing to index.
    NoDocuments = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "HZ000",
            Self::GeneralError => "HZ001",
            Self::SourceNotFound => "HZ002",
            Self::NoDocuments => "HZ003",
        }
    }

    /// Pick the exit code for an error by walking its cause chain.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            let code = cause
                .downcast_ref::<SourceError>()
                .and_then(|e| match e {
                    SourceError::FileNotFound(_) => Some(Self::SourceNotFound),
                    SourceError::Index(inner) => Some(Self::for_index_error(inner)),
                    SourceError::Spreadsheet { .. } => None,
                })
                .or_else(|| cause.downcast_ref::<IndexError>().map(Self::for_index_error));
            if let Some(code) = code {
                if code != Self::GeneralError {
                    return code;
                }
            }
        }
        Self::GeneralError
    }

    fn for_index_error(err: &IndexError) -> Self {
        match err {
            IndexError::DirectoryNotFound(_) => Self::SourceNotFound,
            IndexError::NoDocumentsFound(_) => Self::NoDocuments,
            IndexError::Io { .. } | IndexError::Cache { .. } => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "HZ002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
