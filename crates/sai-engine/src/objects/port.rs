//! Port family (`saiport.h`).

use super::family_table;
use crate::attr_field;
use crate::codec::EnumMap;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::port as ep;
use sai_proto::objects::{PortFecMode, PortOperStatus, PortType};
use sai_proto::PortAttribute;

/// `sai_port_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const TYPE: AttributeId = 0;
    pub const OPER_STATUS: AttributeId = 1;
    pub const QOS_NUMBER_OF_QUEUES: AttributeId = 2;
    pub const QOS_QUEUE_LIST: AttributeId = 3;
    pub const SUPPORTED_SPEED: AttributeId = 4;
    pub const SUPPORTED_FEC_MODE: AttributeId = 5;
    pub const HW_LANE_LIST: AttributeId = 6;
    pub const SPEED: AttributeId = 7;
    pub const ADMIN_STATE: AttributeId = 8;
    pub const MTU: AttributeId = 9;
    pub const FEC_MODE: AttributeId = 10;
    pub const PORT_VLAN_ID: AttributeId = 11;
}

/// `sai_port_type_t`
pub mod port_type {
    pub const LOGICAL: i32 = 0;
    pub const CPU: i32 = 1;
    pub const FABRIC: i32 = 2;
    pub const RECYCLE: i32 = 3;
}

/// `sai_port_oper_status_t`
pub mod oper_status {
    pub const UNKNOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const DOWN: i32 = 2;
    pub const TESTING: i32 = 3;
    pub const NOT_PRESENT: i32 = 4;
}

/// `sai_port_fec_mode_t`
pub mod fec_mode {
    pub const NONE: i32 = 0;
    pub const RS: i32 = 1;
    pub const FC: i32 = 2;
}

/// `sai_port_stat_t`
pub mod stat {
    pub const IF_IN_OCTETS: i32 = 0;
    pub const IF_IN_UCAST_PKTS: i32 = 1;
    pub const IF_IN_NON_UCAST_PKTS: i32 = 2;
    pub const IF_IN_DISCARDS: i32 = 3;
    pub const IF_IN_ERRORS: i32 = 4;
    pub const IF_IN_UNKNOWN_PROTOS: i32 = 5;
    pub const IF_IN_BROADCAST_PKTS: i32 = 6;
    pub const IF_IN_MULTICAST_PKTS: i32 = 7;
    pub const IF_IN_VLAN_DISCARDS: i32 = 8;
    pub const IF_OUT_OCTETS: i32 = 9;
    pub const IF_OUT_UCAST_PKTS: i32 = 10;
    pub const IF_OUT_NON_UCAST_PKTS: i32 = 11;
    pub const IF_OUT_DISCARDS: i32 = 12;
    pub const IF_OUT_ERRORS: i32 = 13;
}

static PORT_TYPE: EnumMap = EnumMap::new(
    "sai_port_type_t",
    &[
        (port_type::LOGICAL, PortType::Logical as i32),
        (port_type::CPU, PortType::Cpu as i32),
        (port_type::FABRIC, PortType::Fabric as i32),
        (port_type::RECYCLE, PortType::Recycle as i32),
    ],
);

/// Also used to translate port state notifications.
pub(crate) static OPER_STATUS: EnumMap = EnumMap::new(
    "sai_port_oper_status_t",
    &[
        (oper_status::UNKNOWN, PortOperStatus::Unknown as i32),
        (oper_status::UP, PortOperStatus::Up as i32),
        (oper_status::DOWN, PortOperStatus::Down as i32),
        (oper_status::TESTING, PortOperStatus::Testing as i32),
        (oper_status::NOT_PRESENT, PortOperStatus::NotPresent as i32),
    ],
);

static FEC_MODE: EnumMap = EnumMap::new(
    "sai_port_fec_mode_t",
    &[
        (fec_mode::NONE, PortFecMode::None as i32),
        (fec_mode::RS, PortFecMode::Rs as i32),
        (fec_mode::FC, PortFecMode::Fc as i32),
    ],
);

static STATS: EnumMap = EnumMap::new(
    "sai_port_stat_t",
    &[
        (stat::IF_IN_OCTETS, 1),
        (stat::IF_IN_UCAST_PKTS, 2),
        (stat::IF_IN_NON_UCAST_PKTS, 3),
        (stat::IF_IN_DISCARDS, 4),
        (stat::IF_IN_ERRORS, 5),
        (stat::IF_IN_UNKNOWN_PROTOS, 6),
        (stat::IF_IN_BROADCAST_PKTS, 7),
        (stat::IF_IN_MULTICAST_PKTS, 8),
        (stat::IF_IN_VLAN_DISCARDS, 9),
        (stat::IF_OUT_OCTETS, 10),
        (stat::IF_OUT_UCAST_PKTS, 11),
        (stat::IF_OUT_NON_UCAST_PKTS, 12),
        (stat::IF_OUT_DISCARDS, 13),
        (stat::IF_OUT_ERRORS, 14),
    ],
);

pub(crate) fn family() -> Family {
    let table = family_table!(Port, PortAttribute, Port, [
        attr_field!(PortAttribute, attr::TYPE, 1, r#type: opt Enum, ReadOnly, &PORT_TYPE),
        attr_field!(PortAttribute, attr::OPER_STATUS, 2, oper_status: opt Enum, ReadOnly, &OPER_STATUS),
        attr_field!(PortAttribute, attr::QOS_NUMBER_OF_QUEUES, 3, qos_number_of_queues: opt U32, ReadOnly),
        attr_field!(PortAttribute, attr::QOS_QUEUE_LIST, 4, qos_queue_list: rep OidList, ReadOnly),
        attr_field!(PortAttribute, attr::SUPPORTED_SPEED, 5, supported_speed: rep U32List, ReadOnly),
        attr_field!(PortAttribute, attr::SUPPORTED_FEC_MODE, 6, supported_fec_mode: rep EnumList, ReadOnly, &FEC_MODE),
        attr_field!(PortAttribute, attr::HW_LANE_LIST, 7, hw_lane_list: rep U32List, CreateOnly),
        attr_field!(PortAttribute, attr::SPEED, 8, speed: opt U32, CreateAndSet),
        attr_field!(PortAttribute, attr::ADMIN_STATE, 9, admin_state: opt Bool, CreateAndSet),
        attr_field!(PortAttribute, attr::MTU, 10, mtu: opt U32, CreateAndSet),
        attr_field!(PortAttribute, attr::FEC_MODE, 11, fec_mode: opt Enum, CreateAndSet, &FEC_MODE),
        attr_field!(PortAttribute, attr::PORT_VLAN_ID, 12, port_vlan_id: opt U16, CreateAndSet),
    ]);

    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE),
            (Operation::Remove, ep::REMOVE),
            (Operation::Set, ep::SET),
            (Operation::Get, ep::GET),
            (Operation::GetStats, ep::GET_STATS),
            (Operation::ClearStats, ep::CLEAR_STATS),
            (Operation::BulkCreate, ep::CREATE_BULK),
            (Operation::BulkRemove, ep::REMOVE),
            (Operation::BulkSet, ep::SET),
        ],
        counters: Some(&STATS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::table::Purpose;
    use pretty_assertions::assert_eq;
    use sai_proto::object_attributes::Body;
    use sai_proto::ObjectAttributes;
    use sai_types::{Attribute, AttributeValue, BoundedList, ObjectType, ValueKind};

    #[test]
    fn test_set_ignores_create_only_lanes() {
        let codec = Registry::builtin().codec(ObjectType::Port).unwrap();
        let lanes = Attribute::new(
            attr::HW_LANE_LIST,
            AttributeValue::U32List(BoundedList::from_vec(vec![0, 1, 2, 3])),
        );
        let speed = Attribute::new(attr::SPEED, AttributeValue::U32(100_000));

        let create = codec.encode(&[lanes.clone(), speed.clone()], Purpose::Create);
        let Some(Body::Port(msg)) = create.body else {
            panic!("expected port attributes");
        };
        assert_eq!(msg.hw_lane_list, vec![0, 1, 2, 3]);
        assert_eq!(msg.speed, Some(100_000));

        let set = codec.encode(&[lanes], Purpose::Set);
        assert_eq!(set.body, Some(Body::Port(PortAttribute::default())));
    }

    #[test]
    fn test_get_decodes_enums_and_lists() {
        let codec = Registry::builtin().codec(ObjectType::Port).unwrap();
        let response = ObjectAttributes::from(Body::Port(PortAttribute {
            oper_status: Some(PortOperStatus::Up as i32),
            supported_fec_mode: vec![PortFecMode::Rs as i32, PortFecMode::Fc as i32],
            supported_speed: vec![10_000, 25_000, 100_000],
            ..Default::default()
        }));
        let mut slots = vec![
            Attribute::slot(attr::OPER_STATUS, ValueKind::Enum, 0),
            Attribute::slot(attr::SUPPORTED_FEC_MODE, ValueKind::EnumList, 4),
            Attribute::slot(attr::SUPPORTED_SPEED, ValueKind::U32List, 0),
        ];
        assert_eq!(codec.decode(Some(response), &mut slots), vec![true; 3]);

        assert_eq!(slots[0].value, AttributeValue::Enum(oper_status::UP));
        let AttributeValue::I32List(fec) = &slots[1].value else {
            panic!("fec slot changed variant");
        };
        assert_eq!(fec.as_slice(), &[fec_mode::RS, fec_mode::FC]);
        let AttributeValue::U32List(speeds) = &slots[2].value else {
            panic!("speed slot changed variant");
        };
        assert_eq!(speeds.count(), 3);
        assert!(speeds.as_slice().is_empty());
    }
}
