//! Neighbor entry family (`saineighbor.h`). Keyed by [`crate::request::EntryKey::Neighbor`].

use super::{family_table, PACKET_ACTION};
use crate::attr_field;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::neighbor as ep;
use sai_proto::NeighborEntryAttribute;

/// `sai_neighbor_entry_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const DST_MAC_ADDRESS: AttributeId = 0;
    pub const PACKET_ACTION: AttributeId = 1;
    pub const NO_HOST_ROUTE: AttributeId = 2;
    pub const META_DATA: AttributeId = 3;
}

pub(crate) fn family() -> Family {
    let table = family_table!(NeighborEntry, NeighborEntryAttribute, NeighborEntry, [
        attr_field!(NeighborEntryAttribute, attr::DST_MAC_ADDRESS, 1, dst_mac_address: opt Mac, CreateAndSet),
        attr_field!(NeighborEntryAttribute, attr::PACKET_ACTION, 2, packet_action: opt Enum, CreateAndSet, &PACKET_ACTION),
        attr_field!(NeighborEntryAttribute, attr::NO_HOST_ROUTE, 3, no_host_route: opt Bool, CreateOnly),
        attr_field!(NeighborEntryAttribute, attr::META_DATA, 4, meta_data: opt U32, CreateAndSet),
    ]);

    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE),
            (Operation::Remove, ep::REMOVE),
            (Operation::Set, ep::SET),
            (Operation::Get, ep::GET),
            (Operation::BulkCreate, ep::CREATE_BULK),
            (Operation::BulkRemove, ep::REMOVE),
            (Operation::BulkSet, ep::SET),
        ],
        counters: None,
    }
}
