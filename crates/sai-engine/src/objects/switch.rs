//! Switch family (`saiswitch.h`).

use super::family_table;
use crate::attr_field;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::switch as ep;
use sai_proto::SwitchAttribute;

/// `sai_switch_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const PORT_NUMBER: AttributeId = 0;
    pub const PORT_LIST: AttributeId = 1;
    pub const CPU_PORT: AttributeId = 2;
    pub const DEFAULT_VIRTUAL_ROUTER_ID: AttributeId = 3;
    pub const DEFAULT_VLAN_ID: AttributeId = 4;
    pub const SRC_MAC_ADDRESS: AttributeId = 5;
    pub const INIT_SWITCH: AttributeId = 6;
    pub const ECMP_DEFAULT_HASH_SEED: AttributeId = 7;
    pub const FDB_AGING_TIME: AttributeId = 8;
    pub const MAX_TEMP: AttributeId = 9;
    /// Callback pointer. Never sent to the engine.
    pub const PORT_STATE_CHANGE_NOTIFY: AttributeId = 10;
}

pub(crate) fn family() -> Family {
    let table = family_table!(Switch, SwitchAttribute, Switch, [
        attr_field!(SwitchAttribute, attr::PORT_NUMBER, 1, port_number: opt U32, ReadOnly),
        attr_field!(SwitchAttribute, attr::PORT_LIST, 2, port_list: rep OidList, ReadOnly),
        attr_field!(SwitchAttribute, attr::CPU_PORT, 3, cpu_port: opt Oid, ReadOnly),
        attr_field!(SwitchAttribute, attr::DEFAULT_VIRTUAL_ROUTER_ID, 4, default_virtual_router_id: opt Oid, ReadOnly),
        attr_field!(SwitchAttribute, attr::DEFAULT_VLAN_ID, 5, default_vlan_id: opt Oid, ReadOnly),
        attr_field!(SwitchAttribute, attr::SRC_MAC_ADDRESS, 6, src_mac_address: opt Mac, CreateAndSet),
        attr_field!(SwitchAttribute, attr::INIT_SWITCH, 7, init_switch: opt Bool, CreateOnly),
        attr_field!(SwitchAttribute, attr::ECMP_DEFAULT_HASH_SEED, 8, ecmp_default_hash_seed: opt U32, CreateAndSet),
        attr_field!(SwitchAttribute, attr::FDB_AGING_TIME, 9, fdb_aging_time: opt U32, CreateAndSet),
        attr_field!(SwitchAttribute, attr::MAX_TEMP, 10, max_temp: opt I32, ReadOnly),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::table::Purpose;
    use pretty_assertions::assert_eq;
    use sai_proto::object_attributes::Body;
    use sai_types::{Attribute, AttributeValue, MacAddress, ObjectType};

    #[test]
    fn test_create_carries_mac_and_init() {
        let codec = Registry::builtin().codec(ObjectType::Switch).unwrap();
        let mac = MacAddress::new([0x02, 0, 0, 0, 0, 0x01]);
        let attrs = codec.encode(
            &[
                Attribute::new(attr::INIT_SWITCH, AttributeValue::Bool(true)),
                Attribute::new(attr::SRC_MAC_ADDRESS, AttributeValue::Mac(mac)),
                Attribute::new(attr::PORT_STATE_CHANGE_NOTIFY, AttributeValue::U64(0xdead)),
            ],
            Purpose::Create,
        );
        assert_eq!(
            attrs.body,
            Some(Body::Switch(SwitchAttribute {
                init_switch: Some(true),
                src_mac_address: Some(mac.as_bytes().to_vec()),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_notify_pointer_has_no_table_entry() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.kind_of(ObjectType::Switch, attr::PORT_STATE_CHANGE_NOTIFY),
            None
        );
    }
}
