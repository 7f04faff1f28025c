use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinProjError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },
}

impl FinProjError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinProjError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        FinProjError::NumericOverflow {
            context: context.into(),
        }
    }
}
