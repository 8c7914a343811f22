use thiserror::Error;

/// Result type alias using RoapidError
pub type Result<T> = std::result::Result<T, RoapidError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the detector, the store or the sync pipeline is
/// classified by one of these kinds. Each kind maps to a stable error code
/// that callers and tests can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Caller supplied something unusable (bad resource key, bad config)
    InvalidInput,
    NotFound,
    /// Read/write/sync/rename failure other than not-found
    Io,
    /// Payload is not a JSON object where one is required
    Format,
    Serialization,
    Persistence,
    /// A downstream publishing sink rejected the document
    ExternalService,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Format => "ERR_FORMAT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the resource key
/// and filesystem path needed to diagnose the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    resource_key: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            resource_key: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add resource key context
    pub fn with_resource_key(mut self, key: impl Into<String>) -> Self {
        self.resource_key = Some(key.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the resource key context, if any
    pub fn resource_key(&self) -> Option<&str> {
        self.resource_key.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.resource_key {
            write!(f, " (resource_key: {})", key)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the core building blocks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoapidError {
    /// Resource key cannot be mapped to a safe relative path
    #[error("Invalid resource key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Payload is not a JSON object
    #[error("Payload is not a JSON object: {message}")]
    Format { message: String },

    /// Filesystem failure
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    /// JSON encoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Configuration could not be read or parsed
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Timestamp could not be parsed
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },
}

impl From<RoapidError> for ExError {
    fn from(err: RoapidError) -> Self {
        match err {
            RoapidError::InvalidKey { key, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_resource_key(key)
                .with_op("resolve_key")
                .with_message(reason),

            RoapidError::Format { message } => ExError::new(ExErrorKind::Format)
                .with_message(format!("Payload is not a JSON object: {}", message)),

            RoapidError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),

            RoapidError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            RoapidError::Config { message } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message(message),

            RoapidError::InvalidTimestamp { value, message } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("parse_timestamp")
                    .with_message(format!("Invalid timestamp '{}': {}", value, message))
            }
        }
    }
}

impl From<serde_json::Error> for RoapidError {
    fn from(err: serde_json::Error) -> Self {
        RoapidError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::NotFound,
            ExErrorKind::Io,
            ExErrorKind::Format,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
            ExErrorKind::ExternalService,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_path_and_op() {
        let err = ExError::new(ExErrorKind::Io)
            .with_op("save_snapshot")
            .with_path("data/users-7.json")
            .with_message("permission denied");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_IO]"));
        assert!(rendered.contains("save_snapshot"));
        assert!(rendered.contains("data/users-7.json"));
        assert!(rendered.contains("permission denied"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk full");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
