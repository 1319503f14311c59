//! CLI-level errors (wraps hierarchy and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::hierarchy::HierarchyError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Hierarchy(e) => match e {
                HierarchyError::Read { .. } => crate::exitcode::NOINPUT,
                HierarchyError::UnknownEntry(_) => crate::exitcode::USAGE,
                HierarchyError::Parse { .. }
                | HierarchyError::DuplicateName(_)
                | HierarchyError::Tree(_) => crate::exitcode::DATAERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TreeError;

    #[test]
    fn given_tree_error_when_mapping_exit_code_then_is_data_error() {
        let err = CliError::from(HierarchyError::Tree(TreeError::RootAbsent));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_unknown_entry_when_mapping_exit_code_then_is_usage() {
        let err = CliError::from(HierarchyError::UnknownEntry("x".into()));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
        assert_eq!(err.to_string(), "unknown entry: x");
    }
}
