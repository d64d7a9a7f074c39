//! Structured keys for keyed entries.

/// IP prefix as network-order address and mask bytes of the same length.
#[derive(Clone, PartialEq, prost::Message)]
pub struct IpPrefix {
    #[prost(bytes = "vec", tag = "1")]
    pub addr: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub mask: Vec<u8>,
}

/// Route entry key: switch + virtual router + destination prefix.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RouteEntry {
    #[prost(uint64, tag = "1")]
    pub switch_id: u64,
    #[prost(uint64, tag = "2")]
    pub vr_id: u64,
    #[prost(message, optional, tag = "3")]
    pub destination: Option<IpPrefix>,
}

/// Neighbor entry key: switch + router interface + neighbor IP.
#[derive(Clone, PartialEq, prost::Message)]
pub struct NeighborEntry {
    #[prost(uint64, tag = "1")]
    pub switch_id: u64,
    #[prost(uint64, tag = "2")]
    pub rif_id: u64,
    #[prost(bytes = "vec", tag = "3")]
    pub ip_address: Vec<u8>,
}

/// Identifier of a keyed entry, embedded in every request for that entry.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EntryKey {
    #[prost(oneof = "entry_key::Key", tags = "1, 2")]
    pub key: Option<entry_key::Key>,
}

pub mod entry_key {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Key {
        #[prost(message, tag = "1")]
        Route(super::RouteEntry),
        #[prost(message, tag = "2")]
        Neighbor(super::NeighborEntry),
    }
}

impl From<RouteEntry> for EntryKey {
    fn from(entry: RouteEntry) -> Self {
        EntryKey {
            key: Some(entry_key::Key::Route(entry)),
        }
    }
}

impl From<NeighborEntry> for EntryKey {
    fn from(entry: NeighborEntry) -> Self {
        EntryKey {
            key: Some(entry_key::Key::Neighbor(entry)),
        }
    }
}
