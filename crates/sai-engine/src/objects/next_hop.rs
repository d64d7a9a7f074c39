//! Next hop family (`sainexthop.h`).

use super::family_table;
use crate::attr_field;
use crate::codec::EnumMap;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::next_hop as ep;
use sai_proto::objects::NextHopType;
use sai_proto::NextHopAttribute;

/// `sai_next_hop_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const TYPE: AttributeId = 0;
    pub const IP: AttributeId = 1;
    pub const ROUTER_INTERFACE_ID: AttributeId = 2;
    pub const TUNNEL_ID: AttributeId = 3;
}

/// `sai_next_hop_type_t`
pub mod next_hop_type {
    pub const IP: i32 = 0;
    pub const MPLS: i32 = 1;
    pub const TUNNEL_ENCAP: i32 = 2;
    pub const SRV6_SIDLIST: i32 = 3;
}

static NEXT_HOP_TYPE: EnumMap = EnumMap::new(
    "sai_next_hop_type_t",
    &[
        (next_hop_type::IP, NextHopType::Ip as i32),
        (next_hop_type::MPLS, NextHopType::Mpls as i32),
        (next_hop_type::TUNNEL_ENCAP, NextHopType::TunnelEncap as i32),
        (next_hop_type::SRV6_SIDLIST, NextHopType::Srv6Sidlist as i32),
    ],
);

pub(crate) fn family() -> Family {
    let table = family_table!(NextHop, NextHopAttribute, NextHop, [
        attr_field!(NextHopAttribute, attr::TYPE, 1, r#type: opt Enum, CreateOnly, &NEXT_HOP_TYPE),
        attr_field!(NextHopAttribute, attr::IP, 2, ip: opt Ip, CreateOnly),
        attr_field!(NextHopAttribute, attr::ROUTER_INTERFACE_ID, 3, router_interface_id: opt Oid, CreateOnly),
        attr_field!(NextHopAttribute, attr::TUNNEL_ID, 4, tunnel_id: opt Oid, CreateOnly),
    ]);

    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE),
            (Operation::Remove, ep::REMOVE),
            (Operation::Get, ep::GET),
            (Operation::BulkCreate, ep::CREATE_BULK),
            (Operation::BulkRemove, ep::REMOVE),
        ],
        counters: None,
    }
}
