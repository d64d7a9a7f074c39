//! Core types shared by the SAI translation layer.
//!
//! This crate carries the caller-facing data model of the switch abstraction
//! interface:
//!
//! - [`ObjectType`]: schema-defined entity families (port, queue, route, ...)
//! - [`RawObjectId`]: opaque 64-bit handles assigned by the forwarding engine
//! - [`AttributeValue`] / [`Attribute`]: the generic, self-describing attribute
//!   list every API call carries
//! - [`BoundedList`]: caller-owned list buffers with the short-buffer protocol
//! - [`SaiStatus`]: status codes returned across the plugin ABI
//! - [`MacAddress`], [`IpAddress`], [`IpPrefix`]: network primitives

mod attribute;
mod ip;
mod mac;
mod object;
mod status;

pub use attribute::{Attribute, AttributeId, AttributeValue, BoundedList, ValueKind};
pub use ip::{IpAddress, IpPrefix};
pub use mac::MacAddress;
pub use object::{ObjectType, RawObjectId, NULL_OBJECT_ID};
pub use status::SaiStatus;

/// Common error type for parsing and conversion failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid MAC address length: {0} bytes (must be 6)")]
    InvalidMacLength(usize),

    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid IP address length: {0} bytes (must be 4 or 16)")]
    InvalidIpLength(usize),

    #[error("invalid IP prefix: {0}")]
    InvalidIpPrefix(String),

    #[error("unknown object type: {0}")]
    UnknownObjectType(i32),
}
