use thiserror::Error;

/// Erreurs du moteur d'encodage ICS.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IcsError {
    /// Horodatage requis absent ou illisible.
    #[error("malformed input: field `{field}` {reason}")]
    MalformedInput { field: String, reason: String },
    #[error("unknown time zone: {0}")]
    UnknownZone(String),
}

impl IcsError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            reason: "is missing".to_string(),
        }
    }

    pub(crate) fn unparseable(field: impl Into<String>, value: &str) -> Self {
        Self::MalformedInput {
            field: field.into(),
            reason: format!("is not a timestamp: {value:?}"),
        }
    }

    pub(crate) fn out_of_range(field: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            reason: "is out of range for an all-day entry".to_string(),
        }
    }
}

pub type Result<T, E = IcsError> = std::result::Result<T, E>;
