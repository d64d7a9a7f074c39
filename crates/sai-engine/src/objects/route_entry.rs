//! Route entry family (`sairoute.h`). Keyed by [`crate::request::EntryKey::Route`].

use super::{family_table, PACKET_ACTION};
use crate::attr_field;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::route as ep;
use sai_proto::RouteEntryAttribute;

/// `sai_route_entry_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const PACKET_ACTION: AttributeId = 0;
    pub const USER_TRAP_ID: AttributeId = 1;
    pub const NEXT_HOP_ID: AttributeId = 2;
    pub const META_DATA: AttributeId = 3;
}

pub(crate) fn family() -> Family {
    let table = family_table!(RouteEntry, RouteEntryAttribute, RouteEntry, [
        attr_field!(RouteEntryAttribute, attr::PACKET_ACTION, 1, packet_action: opt Enum, CreateAndSet, &PACKET_ACTION),
        attr_field!(RouteEntryAttribute, attr::USER_TRAP_ID, 2, user_trap_id: opt Oid, CreateAndSet),
        attr_field!(RouteEntryAttribute, attr::NEXT_HOP_ID, 3, next_hop_id: opt Oid, CreateAndSet),
        attr_field!(RouteEntryAttribute, attr::META_DATA, 4, meta_data: opt U32, CreateAndSet),
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
