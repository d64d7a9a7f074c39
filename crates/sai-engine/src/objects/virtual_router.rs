//! Virtual router family (`saivirtualrouter.h`).

use super::{family_table, PACKET_ACTION};
use crate::attr_field;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::virtual_router as ep;
use sai_proto::VirtualRouterAttribute;

/// `sai_virtual_router_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const ADMIN_V4_STATE: AttributeId = 0;
    pub const ADMIN_V6_STATE: AttributeId = 1;
    pub const SRC_MAC_ADDRESS: AttributeId = 2;
    pub const VIOLATION_TTL1_PACKET_ACTION: AttributeId = 3;
    pub const VIOLATION_IP_OPTIONS_PACKET_ACTION: AttributeId = 4;
}

pub(crate) fn family() -> Family {
    let table = family_table!(VirtualRouter, VirtualRouterAttribute, VirtualRouter, [
        attr_field!(VirtualRouterAttribute, attr::ADMIN_V4_STATE, 1, admin_v4_state: opt Bool, CreateAndSet),
        attr_field!(VirtualRouterAttribute, attr::ADMIN_V6_STATE, 2, admin_v6_state: opt Bool, CreateAndSet),
        attr_field!(VirtualRouterAttribute, attr::SRC_MAC_ADDRESS, 3, src_mac_address: opt Mac, CreateAndSet),
        attr_field!(VirtualRouterAttribute, attr::VIOLATION_TTL1_PACKET_ACTION, 4, violation_ttl1_packet_action: opt Enum, CreateAndSet, &PACKET_ACTION),
        attr_field!(VirtualRouterAttribute, attr::VIOLATION_IP_OPTIONS_PACKET_ACTION, 5, violation_ip_options_packet_action: opt Enum, CreateAndSet, &PACKET_ACTION),
    ]);

    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE),
            (Operation::Remove, ep::REMOVE),
            (Operation::Set, ep::SET),
            (Operation::Get, ep::GET),
        ],
        counters: None,
    }
}
