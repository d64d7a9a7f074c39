//! Attribute translation and dispatch of SAI calls onto a remote forwarding
//! engine.
//!
//! # Architecture
//!
//! - [`codec`]: tagged-union values to typed wire fields and back
//! - [`table`]: per object type, attribute id to field accessor
//! - [`request`]: request builders and response unpackers over a table
//! - [`router`]: (object type, operation) to RPC endpoint
//! - [`bulk`]: per-item status arrays and error modes
//! - [`transport`]: the RPC channel, one attempt per call
//! - [`notify`]: port state change callback slot
//! - [`objects`]: the object families, which only contribute data
//! - [`adapter`]: the facade tying the pieces together
//!
//! # Example
//!
//! ```ignore
//! use sai_engine::objects::queue;
//! use sai_engine::{GrpcTransport, SaiAdapter, TransportConfig};
//! use sai_types::{Attribute, AttributeValue, ObjectType};
//!
//! let transport = GrpcTransport::connect(&TransportConfig::default())?;
//! let adapter = SaiAdapter::new(transport);
//! let oid = adapter.create(
//!     ObjectType::Queue,
//!     switch_id,
//!     &[
//!         Attribute::new(queue::attr::TYPE, AttributeValue::Enum(queue::queue_type::UNICAST)),
//!         Attribute::new(queue::attr::PORT, AttributeValue::Oid(port_id)),
//!         Attribute::new(queue::attr::INDEX, AttributeValue::U8(3)),
//!     ],
//! )?;
//! ```

pub mod adapter;
pub mod bulk;
pub mod codec;
pub mod config;
pub mod error;
pub mod notify;
pub mod objects;
pub mod registry;
pub mod request;
pub mod router;
pub mod table;
pub mod transport;

pub use adapter::{SaiAdapter, StatsMode};
pub use bulk::{BulkResult, ErrorMode};
pub use config::{ConfigError, TransportConfig};
pub use error::{status_of, CodecError, SaiError, SaiResult};
pub use notify::{PortStateCallback, PortStateEvent};
pub use registry::Registry;
pub use request::{EntryKey, ObjectRef};
pub use router::{IdentifierKind, Operation, Route};
pub use transport::{GrpcTransport, RpcRequest, RpcResponse, Transport, TransportError};
