/// Errors raised by MediAssist core operations.
///
/// Each variant is a distinct kind so that API layers can map it to an appropriate status and
/// callers can render a specific message.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("generation service call failed: {0}")]
    TransportFailure(String),
    #[error("generation service reply does not match schema: {0}")]
    SchemaMismatch(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("role '{role}' is not permitted to {action}")]
    Forbidden { role: String, action: &'static str },
    #[error("missing role")]
    MissingRole,
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<mediassist_types::TextError> for AssistError {
    fn from(err: mediassist_types::TextError) -> Self {
        AssistError::InvalidInput(err.to_string())
    }
}

pub type AssistResult<T> = std::result::Result<T, AssistError>;
