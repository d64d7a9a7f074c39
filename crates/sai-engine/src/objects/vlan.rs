//! VLAN family (`saivlan.h`).

use super::family_table;
use crate::attr_field;
use crate::codec::EnumMap;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::vlan as ep;
use sai_proto::VlanAttribute;

/// `sai_vlan_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const VLAN_ID: AttributeId = 0;
    pub const MEMBER_LIST: AttributeId = 1;
    pub const MAX_LEARNED_ADDRESSES: AttributeId = 2;
    pub const LEARN_DISABLE: AttributeId = 3;
}

/// `sai_vlan_stat_t`
pub mod stat {
    pub const IN_OCTETS: i32 = 0;
    pub const IN_PACKETS: i32 = 1;
    pub const IN_UCAST_PKTS: i32 = 2;
    pub const IN_NON_UCAST_PKTS: i32 = 3;
    pub const IN_DISCARDS: i32 = 4;
    pub const IN_ERRORS: i32 = 5;
    pub const IN_UNKNOWN_PROTOS: i32 = 6;
    pub const OUT_OCTETS: i32 = 7;
    pub const OUT_PACKETS: i32 = 8;
    pub const OUT_UCAST_PKTS: i32 = 9;
    pub const OUT_NON_UCAST_PKTS: i32 = 10;
    pub const OUT_DISCARDS: i32 = 11;
    pub const OUT_ERRORS: i32 = 12;
    pub const OUT_QLEN: i32 = 13;
}

static STATS: EnumMap = EnumMap::new(
    "sai_vlan_stat_t",
    &[
        (stat::IN_OCTETS, 1),
        (stat::IN_PACKETS, 2),
        (stat::IN_UCAST_PKTS, 3),
        (stat::IN_NON_UCAST_PKTS, 4),
        (stat::IN_DISCARDS, 5),
        (stat::IN_ERRORS, 6),
        (stat::IN_UNKNOWN_PROTOS, 7),
        (stat::OUT_OCTETS, 8),
        (stat::OUT_PACKETS, 9),
        (stat::OUT_UCAST_PKTS, 10),
        (stat::OUT_NON_UCAST_PKTS, 11),
        (stat::OUT_DISCARDS, 12),
        (stat::OUT_ERRORS, 13),
        (stat::OUT_QLEN, 14),
    ],
);

pub(crate) fn family() -> Family {
    let table = family_table!(Vlan, VlanAttribute, Vlan, [
        attr_field!(VlanAttribute, attr::VLAN_ID, 1, vlan_id: opt U16, CreateOnly),
        attr_field!(VlanAttribute, attr::MEMBER_LIST, 2, member_list: rep OidList, ReadOnly),
        attr_field!(VlanAttribute, attr::MAX_LEARNED_ADDRESSES, 3, max_learned_addresses: opt U32, CreateAndSet),
        attr_field!(VlanAttribute, attr::LEARN_DISABLE, 4, learn_disable: opt Bool, CreateAndSet),
    ]);

    // The engine has no SetVlanAttribute method.
    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE),
            (Operation::Remove, ep::REMOVE),
            (Operation::Get, ep::GET),
            (Operation::GetStats, ep::GET_STATS),
        ],
        counters: Some(&STATS),
    }
}
