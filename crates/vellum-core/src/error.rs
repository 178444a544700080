use crate::value::Value;
use thiserror::Error as ThisError;

///
/// Error
///
/// Umbrella error for the vellum runtime. Domain kinds stay distinct so
/// callers can route programmer errors away from data-validation handling.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_not_set(&self) -> bool {
        matches!(self, Self::Access(AccessError::NotSet { .. }))
    }
}

///
/// ValidationError
///
/// The single data-validation error kind, parameterized by failure mode.
/// Always carries the offending field name and, where applicable, the bad
/// value and/or the expected domain.
///

#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("field '{field}' must be {expected}, got {value}")]
    WrongType {
        field: String,
        expected: &'static str,
        value: Value,
    },

    #[error("field '{field}' is not nullable")]
    NullNotAllowed { field: String },

    #[error("field '{field}': cannot parse '{input}' as a date-time")]
    DateParse {
        field: String,
        input: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("field '{field}': no variant of {path} matches {value}")]
    EnumCoercion {
        field: String,
        path: &'static str,
        value: Value,
    },

    #[error(
        "field '{field}': {value} is ambiguous for {path}, matching variant '{by_value}' by value and '{by_name}' by name"
    )]
    EnumAmbiguous {
        field: String,
        path: &'static str,
        value: Value,
        by_value: &'static str,
        by_name: &'static str,
    },

    #[error("field '{field}' expects a sequence of elements, got a bare string")]
    TextWhereSequence { field: String },

    #[error("field '{field}' expects a sequence, got {value}")]
    NotASequence { field: String, value: Value },

    #[error("field '{field}', element {index}: {source}")]
    Element {
        field: String,
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("field '{field}' expects a record of type {expected}, got one of type {found}")]
    RecordType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid value {value} for field '{field}'")]
    CheckFailed { field: String, value: Value },

    #[error("missing required fields for {record}: {}", .fields.join(", "))]
    MissingRequired {
        record: &'static str,
        fields: Vec<&'static str>,
    },
}

impl ValidationError {
    /// Re-key an error under its position within a list field.
    pub(crate) fn into_element(self, field: &str, index: usize) -> Self {
        Self::Element {
            field: field.to_string(),
            index,
            source: Box::new(self),
        }
    }
}

///
/// AccessError
///
/// No-value-present and name-resolution failures. These signal "not set"
/// or a schema-authoring bug, never "invalid data", and must not be caught
/// by data-validation logic.
///

#[derive(Debug, ThisError)]
pub enum AccessError {
    #[error("field '{field}' is not set")]
    NotSet { field: String },

    #[error("cannot delete required field '{field}'")]
    DeleteRequired { field: String },

    #[error("no field named '{field}' on {record}")]
    UnknownField {
        record: &'static str,
        field: String,
    },
}

///
/// SchemaError
///
/// Schema-authoring failures, raised at build time so declaration bugs
/// surface before any record exists.
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("schema {schema}: invalid default for field '{field}': {source}")]
    InvalidDefault {
        schema: &'static str,
        field: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("schema {schema}: duplicate field '{field}'")]
    DuplicateField {
        schema: &'static str,
        field: &'static str,
    },

    #[error("schema {schema}: fixed value '{field}' does not match any declared field")]
    UnknownOverride {
        schema: &'static str,
        field: &'static str,
    },

    #[error("schema {schema}: invalid fixed value for field '{field}': {source}")]
    InvalidOverride {
        schema: &'static str,
        field: &'static str,
        #[source]
        source: ValidationError,
    },
}
