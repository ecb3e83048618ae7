use std::fmt;

use thiserror::Error;

use crate::model::{Gender, PersonId, Relation, Role};

/// All failures the core can report to a caller.
///
/// Every variant is recoverable: a rejected mutation leaves the tree
/// untouched, and a failed load/save leaves the in-memory tree (if any)
/// unchanged. The core never panics on malformed user input.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A name field broke the letters-and-spaces rule.
    #[error(
        "{field} must be at least 2 characters, start with two letters, \
         and contain only letters and spaces (got {value:?})"
    )]
    InvalidNameFormat { field: &'static str, value: String },

    /// An address text field broke the letters-and-spaces rule.
    #[error(
        "{field} must be at least 2 characters, start with two letters, \
         and contain only letters and spaces (got {value:?})"
    )]
    InvalidAddressFormat { field: &'static str, value: String },

    /// Street number or postcode did not parse as an integer.
    #[error("{field} must be a whole number (got {value:?})")]
    InvalidNumericField { field: &'static str, value: String },

    /// The candidate's gender does not fit the requested relation.
    #[error("a {relation} must be {expected}")]
    GenderMismatch { relation: Relation, expected: Gender },

    /// The target already has a spouse.
    #[error("{target} already has a spouse; a person can have only one")]
    SpouseAlreadyExists { target: String },

    /// A parent of the candidate's gender is already recorded.
    #[error("a {relation} already exists; a person can have one father and one mother")]
    ParentAlreadyExists { relation: Relation },

    /// The target's role does not permit attaching this relation.
    #[error("a person with role {role} cannot be given a {relation}")]
    RoleNotPermitted { role: Role, relation: Relation },

    /// `add_root` was called while a root person exists.
    #[error("a root person already exists; reset the tree first")]
    RootAlreadyExists,

    /// The operation needs a root person and the tree has none.
    #[error("the tree has no root person")]
    NoRootPerson,

    /// A handle passed in by the caller does not resolve to a person.
    #[error("no person with id {0}")]
    PersonNotFound(PersonId),

    /// Attempted to serialize an empty (rootless) tree.
    #[error("nothing to save: the tree has no root person")]
    NothingToSave,

    /// Persisted bytes did not decode to a well-formed tree.
    #[error("corrupt tree data: {0}")]
    CorruptData(String),

    /// The underlying storage was unreadable or unwritable.
    #[error("file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl TreeError {
    /// The stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidNameFormat { .. } => ErrorCode::InvalidNameFormat,
            Self::InvalidAddressFormat { .. } => ErrorCode::InvalidAddressFormat,
            Self::InvalidNumericField { .. } => ErrorCode::InvalidNumericField,
            Self::GenderMismatch { .. } => ErrorCode::GenderMismatch,
            Self::SpouseAlreadyExists { .. } => ErrorCode::SpouseAlreadyExists,
            Self::ParentAlreadyExists { .. } => ErrorCode::ParentAlreadyExists,
            Self::RoleNotPermitted { .. } => ErrorCode::RoleNotPermitted,
            Self::RootAlreadyExists => ErrorCode::RootAlreadyExists,
            Self::NoRootPerson => ErrorCode::NoRootPerson,
            Self::PersonNotFound(_) => ErrorCode::PersonNotFound,
            Self::NothingToSave => ErrorCode::NothingToSave,
            Self::CorruptData(_) => ErrorCode::CorruptData,
            Self::Io(_) => ErrorCode::Io,
        }
    }
}

/// Machine-readable error codes for UI and agent decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidNameFormat,
    InvalidAddressFormat,
    InvalidNumericField,
    GenderMismatch,
    SpouseAlreadyExists,
    ParentAlreadyExists,
    RoleNotPermitted,
    RootAlreadyExists,
    NoRootPerson,
    PersonNotFound,
    NothingToSave,
    CorruptData,
    Io,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidNameFormat => "E1001",
            Self::InvalidAddressFormat => "E1002",
            Self::InvalidNumericField => "E1003",
            Self::GenderMismatch => "E2001",
            Self::SpouseAlreadyExists => "E2002",
            Self::ParentAlreadyExists => "E2003",
            Self::RoleNotPermitted => "E2004",
            Self::RootAlreadyExists => "E2005",
            Self::NoRootPerson => "E2006",
            Self::PersonNotFound => "E2007",
            Self::NothingToSave => "E3001",
            Self::CorruptData => "E3002",
            Self::Io => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidNameFormat => "Invalid name",
            Self::InvalidAddressFormat => "Invalid address",
            Self::InvalidNumericField => "Invalid number",
            Self::GenderMismatch => "Wrong gender for relation",
            Self::SpouseAlreadyExists => "Spouse already exists",
            Self::ParentAlreadyExists => "Parent already exists",
            Self::RoleNotPermitted => "Relation not permitted for this person",
            Self::RootAlreadyExists => "Root person already exists",
            Self::NoRootPerson => "No root person",
            Self::PersonNotFound => "Person not found",
            Self::NothingToSave => "Nothing to save",
            Self::CorruptData => "Corrupt tree file",
            Self::Io => "File I/O failed",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidNameFormat | Self::InvalidAddressFormat => {
                Some("Use at least 2 characters, letters and spaces only.")
            }
            Self::InvalidNumericField => {
                Some("Street number and postcode can only contain digits.")
            }
            Self::GenderMismatch => Some("Pick the gender the relation requires."),
            Self::SpouseAlreadyExists => None,
            Self::ParentAlreadyExists => None,
            Self::RoleNotPermitted => {
                Some("Check the selectable relative types for this person.")
            }
            Self::RootAlreadyExists => Some("Reset the tree before adding a new root."),
            Self::NoRootPerson => Some("Add a root person or load a saved tree first."),
            Self::PersonNotFound => Some("Use `show` to list people and their ids."),
            Self::NothingToSave => Some("Add a root person before saving."),
            Self::CorruptData => Some("Load a file that was saved by this application."),
            Self::Io => Some("Check the path and file permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 13] = [
        ErrorCode::InvalidNameFormat,
        ErrorCode::InvalidAddressFormat,
        ErrorCode::InvalidNumericField,
        ErrorCode::GenderMismatch,
        ErrorCode::SpouseAlreadyExists,
        ErrorCode::ParentAlreadyExists,
        ErrorCode::RoleNotPermitted,
        ErrorCode::RootAlreadyExists,
        ErrorCode::NoRootPerson,
        ErrorCode::PersonNotFound,
        ErrorCode::NothingToSave,
        ErrorCode::CorruptData,
        ErrorCode::Io,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5, "code: {s}");
            assert!(s.starts_with('E'), "code: {s}");
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()), "code: {s}");
        }
    }

    #[test]
    fn error_maps_to_its_code() {
        use crate::error::TreeError;
        assert_eq!(TreeError::NothingToSave.code(), ErrorCode::NothingToSave);
        assert_eq!(
            TreeError::CorruptData("truncated".into()).code(),
            ErrorCode::CorruptData
        );
    }
}
