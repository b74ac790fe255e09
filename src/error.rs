use crate::zcl::TransportError;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ProfileError {
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Property registered twice: {0}")]
    DuplicateProperty(String),

    #[error("Property is read-only: {0}")]
    ReadOnly(String),

    #[error("Property cannot be read back: {0}")]
    WriteOnly(String),

    #[error("Unknown value '{label}' for {property}")]
    UnknownLabel { property: String, label: String },

    #[error("Value {value} for {property} is outside {min}..={max}")]
    OutOfRange {
        property: String,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Invalid value for {property}: expected {expected}")]
    InvalidValue {
        property: String,
        expected: &'static str,
    },

    #[error("Missing value for {gate} of {property}")]
    MissingGate { property: String, gate: String },

    #[error("Read of {attribute} returned no value")]
    MissingAttribute { attribute: String },

    #[error("Invalid bitfield layout for {attribute}: {reason}")]
    InvalidLayout {
        attribute: &'static str,
        reason: String,
    },

    #[error("{0} is not part of the revision schema")]
    SchemaMismatch(String),

    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
