use thiserror::Error;

/// Errors that can occur while preparing or generating a remittance.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemessaError {
    /// One or more input records failed boundary validation.
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    /// Payment method code outside the supported table.
    #[error("unknown payment method code '{0}'")]
    UnknownMethod(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// File sequence numbering error.
    #[error("numbering error: {0}")]
    Numbering(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// A structural problem with one input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Index of the payment in the input slice; `None` for the payer profile.
    pub row: Option<usize>,
    /// Field name (e.g. "destination.account").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {}: {}: {}", row, self.field, self.message),
            None => write!(f, "payer: {}: {}", self.field, self.message),
        }
    }
}

impl ValidationError {
    /// Error on the payer profile.
    pub fn payer(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row: None,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error on the payment at `row`.
    pub fn row(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Something the operator should see before sending the file, but which does
/// not block generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Index of the payment in the input slice; `None` for file-level fields.
    pub row: Option<usize>,
    /// Record field the warning refers to.
    pub field: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// The normalized value is longer than its fixed-width slot and was cut.
    Truncated { width: usize, length: usize },
    /// The record is marked as processed by an earlier remittance.
    AlreadyProcessed,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(row) = self.row {
            write!(f, "row {row}: ")?;
        }
        match &self.kind {
            WarningKind::Truncated { width, length } => write!(
                f,
                "{}: value of {length} characters truncated to {width}",
                self.field
            ),
            WarningKind::AlreadyProcessed => {
                write!(f, "{}: already included in a previous remittance", self.field)
            }
        }
    }
}
