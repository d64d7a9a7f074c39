//! Error types of the translation layer.
//!
//! Every error collapses to a [`SaiStatus`] at the plugin boundary; the
//! detail is only ever written to the log.

use crate::router::Operation;
use crate::transport::TransportError;
use sai_types::{ObjectType, SaiStatus, ValueKind};
use thiserror::Error;

/// Local value conversion fault. Never escalated to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The caller's value variant does not match the declared kind.
    #[error("value does not fit declared kind {kind:?}")]
    KindMismatch { kind: ValueKind },

    /// The wire field does not carry the shape the declared kind expects.
    #[error("wire value does not fit declared kind {kind:?}")]
    WireMismatch { kind: ValueKind },

    /// Integer outside the range of the declared width.
    #[error("value {value} out of range for {kind:?}")]
    OutOfRange { kind: ValueKind, value: i64 },

    /// MAC address that is not exactly 6 bytes.
    #[error("invalid MAC address length: {0} bytes")]
    MacLength(usize),

    /// IP address that is neither 4 nor 16 bytes.
    #[error("invalid IP address length: {0} bytes")]
    IpLength(usize),

    /// Enum value with no entry in the mapping table.
    #[error("{map}: no mapping for {value}")]
    UnmappedEnum { map: &'static str, value: i32 },
}

/// Error type of the SAI adapter.
#[derive(Debug, Error)]
pub enum SaiError {
    /// No endpoint is wired for this object type and operation.
    #[error("{operation} is not implemented for {object_type}")]
    NotImplemented {
        object_type: ObjectType,
        operation: Operation,
    },

    /// The request is understood but the value is not supported.
    #[error("not supported: {what}")]
    NotSupported { what: String },

    /// Malformed caller input.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// The RPC failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote engine answered with a response of the wrong shape.
    #[error("unexpected response from {endpoint}: {message}")]
    UnexpectedResponse {
        endpoint: &'static str,
        message: String,
    },

    /// A port state callback is already installed.
    #[error("port state callback already registered")]
    AlreadyRegistered,

    /// The adapter has not been initialized.
    #[error("SAI not initialized")]
    Uninitialized,

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl SaiError {
    pub fn not_implemented(object_type: ObjectType, operation: Operation) -> Self {
        SaiError::NotImplemented {
            object_type,
            operation,
        }
    }

    pub fn not_supported(what: impl Into<String>) -> Self {
        SaiError::NotSupported { what: what.into() }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        SaiError::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn unexpected_response(endpoint: &'static str, message: impl Into<String>) -> Self {
        SaiError::UnexpectedResponse {
            endpoint,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SaiError::Internal {
            message: message.into(),
        }
    }

    /// Status code reported across the plugin ABI.
    ///
    /// Every remote fault is a generic failure.
    pub fn status(&self) -> SaiStatus {
        match self {
            SaiError::NotImplemented { .. } => SaiStatus::NotImplemented,
            SaiError::NotSupported { .. } => SaiStatus::NotSupported,
            SaiError::InvalidParameter { .. } => SaiStatus::InvalidParameter,
            SaiError::AlreadyRegistered => SaiStatus::ItemAlreadyExists,
            SaiError::Uninitialized => SaiStatus::Uninitialized,
            SaiError::Transport(_)
            | SaiError::UnexpectedResponse { .. }
            | SaiError::Config(_)
            | SaiError::Internal { .. } => SaiStatus::Failure,
        }
    }
}

/// Result type for SAI operations.
pub type SaiResult<T> = Result<T, SaiError>;

/// Converts a result into the status code reported across the plugin ABI.
pub fn status_of<T>(result: &SaiResult<T>) -> SaiStatus {
    match result {
        Ok(_) => SaiStatus::Success,
        Err(e) => e.status(),
    }
}
