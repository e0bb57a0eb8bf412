use models::errors::ModelError;
use models::object_id::ObjectId;
use thiserror::Error;
use tracing::error;

/// Failure kinds surfaced by the services. Every variant carries the
/// client-facing message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    MissingParameter(String),
    #[error("{0}")]
    InvalidIdFormat(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    DuplicateKey(String),
    #[error("{0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }

    /// Classify a store failure. Anything that is not a field or uniqueness
    /// violation is logged and replaced by `failure`.
    pub fn store(e: ModelError, failure: &str) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Duplicate(msg) => Self::DuplicateKey(msg),
            other => {
                error!(error = %other, "{}", failure);
                Self::Db(failure.to_string())
            }
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::InvalidId(_) => Self::InvalidIdFormat("Invalid ID format".to_string()),
            ModelError::Duplicate(msg) => Self::DuplicateKey(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

/// Parse a path or body identifier, reporting `invalid` when it is not 24 hex chars.
pub(crate) fn parse_id(raw: &str, invalid: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(raw).map_err(|_| ServiceError::InvalidIdFormat(invalid.to_string()))
}

/// Like [`parse_id`] for query parameters that may be absent.
pub(crate) fn require_id(raw: Option<&str>, missing: &str, invalid: &str) -> Result<ObjectId, ServiceError> {
    match raw {
        Some(v) if !v.is_empty() => parse_id(v, invalid),
        _ => Err(ServiceError::MissingParameter(missing.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclassified_store_errors_get_generic_message() {
        let e = ServiceError::store(ModelError::Db("connection reset".into()), "Failed to create device");
        assert_eq!(e, ServiceError::Db("Failed to create device".into()));

        let e = ServiceError::store(ModelError::Validation("Validation error: x".into()), "Failed");
        assert_eq!(e.to_string(), "Validation error: x");
    }

    #[test]
    fn model_errors_convert_without_echoing_raw_ids() {
        let e: ServiceError = ObjectId::parse_str("<script>").unwrap_err().into();
        assert_eq!(e, ServiceError::InvalidIdFormat("Invalid ID format".into()));
        let e: ServiceError = ModelError::Duplicate("ip".into()).into();
        assert!(matches!(e, ServiceError::DuplicateKey(_)));
    }

    #[test]
    fn required_ids_distinguish_missing_from_malformed() {
        assert!(matches!(require_id(None, "m", "i"), Err(ServiceError::MissingParameter(_))));
        assert!(matches!(require_id(Some(""), "m", "i"), Err(ServiceError::MissingParameter(_))));
        assert!(matches!(require_id(Some("xyz"), "m", "i"), Err(ServiceError::InvalidIdFormat(m)) if m == "i"));
        assert!(require_id(Some("AAAAAAAAAAAAAAAAAAAAAAAA"), "m", "i").is_ok());
    }
}
