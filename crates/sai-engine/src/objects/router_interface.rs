//! Router interface family (`sairouterinterface.h`).

use super::family_table;
use crate::attr_field;
use crate::codec::EnumMap;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::router_interface as ep;
use sai_proto::objects::RouterInterfaceType;
use sai_proto::RouterInterfaceAttribute;

/// `sai_router_interface_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const VIRTUAL_ROUTER_ID: AttributeId = 0;
    pub const TYPE: AttributeId = 1;
    pub const PORT_ID: AttributeId = 2;
    pub const VLAN_ID: AttributeId = 3;
    pub const OUTER_VLAN_ID: AttributeId = 4;
    pub const SRC_MAC_ADDRESS: AttributeId = 5;
    pub const ADMIN_V4_STATE: AttributeId = 6;
    pub const ADMIN_V6_STATE: AttributeId = 7;
    pub const MTU: AttributeId = 8;
}

/// `sai_router_interface_type_t`
pub mod rif_type {
    pub const PORT: i32 = 0;
    pub const VLAN: i32 = 1;
    pub const LOOPBACK: i32 = 2;
    pub const MPLS_ROUTER: i32 = 3;
    pub const SUB_PORT: i32 = 4;
    pub const BRIDGE: i32 = 5;
}

/// `sai_router_interface_stat_t`
pub mod stat {
    pub const IN_OCTETS: i32 = 0;
    pub const IN_PACKETS: i32 = 1;
    pub const OUT_OCTETS: i32 = 2;
    pub const OUT_PACKETS: i32 = 3;
    pub const IN_ERROR_OCTETS: i32 = 4;
    pub const IN_ERROR_PACKETS: i32 = 5;
    pub const OUT_ERROR_OCTETS: i32 = 6;
    pub const OUT_ERROR_PACKETS: i32 = 7;
}

static RIF_TYPE: EnumMap = EnumMap::new(
    "sai_router_interface_type_t",
    &[
        (rif_type::PORT, RouterInterfaceType::Port as i32),
        (rif_type::VLAN, RouterInterfaceType::Vlan as i32),
        (rif_type::LOOPBACK, RouterInterfaceType::Loopback as i32),
        (rif_type::MPLS_ROUTER, RouterInterfaceType::MplsRouter as i32),
        (rif_type::SUB_PORT, RouterInterfaceType::SubPort as i32),
        (rif_type::BRIDGE, RouterInterfaceType::Bridge as i32),
    ],
);

static STATS: EnumMap = EnumMap::new(
    "sai_router_interface_stat_t",
    &[
        (stat::IN_OCTETS, 1),
        (stat::IN_PACKETS, 2),
        (stat::OUT_OCTETS, 3),
        (stat::OUT_PACKETS, 4),
        (stat::IN_ERROR_OCTETS, 5),
        (stat::IN_ERROR_PACKETS, 6),
        (stat::OUT_ERROR_OCTETS, 7),
        (stat::OUT_ERROR_PACKETS, 8),
    ],
);

pub(crate) fn family() -> Family {
    let table = family_table!(RouterInterface, RouterInterfaceAttribute, RouterInterface, [
        attr_field!(RouterInterfaceAttribute, attr::VIRTUAL_ROUTER_ID, 1, virtual_router_id: opt Oid, CreateOnly),
        attr_field!(RouterInterfaceAttribute, attr::TYPE, 2, r#type: opt Enum, CreateOnly, &RIF_TYPE),
        attr_field!(RouterInterfaceAttribute, attr::PORT_ID, 3, port_id: opt Oid, CreateOnly),
        attr_field!(RouterInterfaceAttribute, attr::VLAN_ID, 4, vlan_id: opt Oid, CreateOnly),
        attr_field!(RouterInterfaceAttribute, attr::OUTER_VLAN_ID, 9, outer_vlan_id: opt U16, CreateOnly),
        attr_field!(RouterInterfaceAttribute, attr::SRC_MAC_ADDRESS, 5, src_mac_address: opt Mac, CreateAndSet),
        attr_field!(RouterInterfaceAttribute, attr::ADMIN_V4_STATE, 6, admin_v4_state: opt Bool, CreateAndSet),
        attr_field!(RouterInterfaceAttribute, attr::ADMIN_V6_STATE, 7, admin_v6_state: opt Bool, CreateAndSet),
        attr_field!(RouterInterfaceAttribute, attr::MTU, 8, mtu: opt U32, CreateAndSet),
    ]);

    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE),
            (Operation::Remove, ep::REMOVE),
            (Operation::Set, ep::SET),
            (Operation::Get, ep::GET),
            (Operation::GetStats, ep::GET_STATS),
        ],
        counters: Some(&STATS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use pretty_assertions::assert_eq;
    use sai_types::{AttributeValue, ObjectType, ValueKind};

    #[test]
    fn test_wire_ids_follow_message_numbering() {
        let codec = Registry::builtin().codec(ObjectType::RouterInterface).unwrap();
        assert_eq!(
            codec.wire_ids(&[attr::OUTER_VLAN_ID, attr::MTU, attr::TYPE]),
            vec![9, 8, 2]
        );
    }

    #[test]
    fn test_clear_stats_is_not_wired() {
        let registry = Registry::builtin();
        assert!(!registry
            .router()
            .is_wired(ObjectType::RouterInterface, Operation::ClearStats));
        assert_eq!(
            registry.kind_of(ObjectType::RouterInterface, attr::OUTER_VLAN_ID),
            Some(ValueKind::U16)
        );
        assert_eq!(
            AttributeValue::empty(ValueKind::U16, 0),
            AttributeValue::U16(0)
        );
    }
}
