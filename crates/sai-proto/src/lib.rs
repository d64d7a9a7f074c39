//! Wire protocol of the remote forwarding engine.
//!
//! The engine exposes one gRPC service per object family and one unary
//! method per (object type, operation). Every method shares the envelope
//! messages in [`envelope`]; the per-family payload travels in the
//! [`ObjectAttributes`] oneof.
//!
//! The messages are declared with `prost` derives rather than generated at
//! build time, so the crate builds without `protoc`. Field tags are the wire
//! contract and must not be renumbered.
//!
//! # Modules
//!
//! - [`envelope`]: create/remove/set/get/stats/bulk request and response messages
//! - [`objects`]: per-family attribute messages and the wire enums they use
//! - [`keys`]: structured keys of keyed entries (route, neighbor)
//! - [`endpoints`]: RPC method paths

pub mod endpoints;
pub mod envelope;
pub mod keys;
pub mod objects;

pub use envelope::*;
pub use keys::{entry_key, EntryKey, IpPrefix, NeighborEntry, RouteEntry};
pub use objects::{
    object_attributes, NeighborEntryAttribute, NextHopAttribute, NextHopGroupAttribute,
    NextHopGroupMemberAttribute, ObjectAttributes, PortAttribute, QueueAttribute,
    RouteEntryAttribute, RouterInterfaceAttribute, SwitchAttribute, VirtualRouterAttribute,
    VlanAttribute,
};
