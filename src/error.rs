//! Structured error types for definition construction.

use serde::Serialize;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Candidate set errors
    EmptyCandidateSet,
    MissingSchema,
    UndeclaredQualifier,

    // Document shape errors
    MissingField,
    InvalidField,

    // Catalog errors
    DuplicateDefinition,

    // I/O and parse failures outside the definition core
    ReadFailed,
}

/// Rejected-input errors raised while building a config definition.
///
/// None of these are internal faults: each one points at the part of the
/// input that has to change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("'values' must not be null or empty")]
    EmptyCandidateSet,

    #[error("qualifiers [{}] are used but no schema was declared", .fields.join(", "))]
    MissingSchema { fields: Vec<String> },

    #[error(
        "qualifiers [{}] are not declared in the schema (used by {})",
        .fields.join(", "),
        .candidates.join(", ")
    )]
    UndeclaredQualifier {
        fields: Vec<String>,
        candidates: Vec<String>,
    },

    #[error("'{field}' is required")]
    MissingField { field: String },

    #[error("'{field}' is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("definition '{name}' is declared more than once")]
    DuplicateDefinition { name: String },
}

impl DefinitionError {
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyCandidateSet => ErrorCode::EmptyCandidateSet,
            Self::MissingSchema { .. } => ErrorCode::MissingSchema,
            Self::UndeclaredQualifier { .. } => ErrorCode::UndeclaredQualifier,
            Self::MissingField { .. } => ErrorCode::MissingField,
            Self::InvalidField { .. } => ErrorCode::InvalidField,
            Self::DuplicateDefinition { .. } => ErrorCode::DuplicateDefinition,
        }
    }

    /// Serializable form for machine-readable output.
    pub fn report(&self) -> ErrorReport {
        let report = ErrorReport::new(self.code(), self.to_string());
        match self {
            Self::MissingSchema { fields } => report.with_field(fields.join(",")),
            Self::UndeclaredQualifier { fields, candidates } => report
                .with_field(fields.join(","))
                .with_details(candidates.join("; ")),
            Self::MissingField { field } | Self::InvalidField { field, .. } => {
                report.with_field(field.as_str())
            }
            Self::DuplicateDefinition { name } => report.with_details(name.as_str()),
            Self::EmptyCandidateSet => report,
        }
    }
}

/// Flat error record for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Replace the message with a fuller one that includes the error chain.
    fn with_context(mut self, message: String) -> Self {
        self.message = message;
        self
    }
}

// Reports for anyhow chains: use the wrapped DefinitionError if there is one
impl From<&anyhow::Error> for ErrorReport {
    fn from(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<DefinitionError>() {
            Some(def_err) => def_err.report().with_context(format!("{:#}", err)),
            None => ErrorReport::new(ErrorCode::ReadFailed, format!("{:#}", err)),
        }
    }
}

/// Result type for definition operations.
pub type DefinitionResult<T> = std::result::Result<T, DefinitionError>;
