//! Queue family (`saiqueue.h`).

use super::family_table;
use crate::attr_field;
use crate::codec::EnumMap;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::queue as ep;
use sai_proto::objects::QueueType;
use sai_proto::QueueAttribute;

/// `sai_queue_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const TYPE: AttributeId = 0;
    pub const PORT: AttributeId = 1;
    pub const INDEX: AttributeId = 2;
    pub const PARENT_SCHEDULER_NODE: AttributeId = 3;
    pub const WRED_PROFILE_ID: AttributeId = 4;
    pub const BUFFER_PROFILE_ID: AttributeId = 5;
    pub const SCHEDULER_PROFILE_ID: AttributeId = 6;
    pub const PAUSE_STATUS: AttributeId = 7;
}

/// `sai_queue_type_t`
pub mod queue_type {
    pub const ALL: i32 = 0;
    pub const UNICAST: i32 = 1;
    pub const MULTICAST: i32 = 2;
    pub const UNICAST_VOQ: i32 = 3;
    pub const MULTICAST_VOQ: i32 = 4;
    pub const FABRIC_TX: i32 = 5;
}

/// `sai_queue_stat_t`
pub mod stat {
    pub const PACKETS: i32 = 0;
    pub const BYTES: i32 = 1;
    pub const DROPPED_PACKETS: i32 = 2;
    pub const DROPPED_BYTES: i32 = 3;
}

static QUEUE_TYPE: EnumMap = EnumMap::new(
    "sai_queue_type_t",
    &[
        (queue_type::ALL, QueueType::All as i32),
        (queue_type::UNICAST, QueueType::Unicast as i32),
        (queue_type::MULTICAST, QueueType::Multicast as i32),
        (queue_type::UNICAST_VOQ, QueueType::UnicastVoq as i32),
        (queue_type::MULTICAST_VOQ, QueueType::MulticastVoq as i32),
        (queue_type::FABRIC_TX, QueueType::FabricTx as i32),
    ],
);

static STATS: EnumMap = EnumMap::new(
    "sai_queue_stat_t",
    &[
        (stat::PACKETS, 1),
        (stat::BYTES, 2),
        (stat::DROPPED_PACKETS, 3),
        (stat::DROPPED_BYTES, 4),
    ],
);

pub(crate) fn family() -> Family {
    let table = family_table!(Queue, QueueAttribute, Queue, [
        attr_field!(QueueAttribute, attr::TYPE, 1, r#type: opt Enum, CreateOnly, &QUEUE_TYPE),
        attr_field!(QueueAttribute, attr::PORT, 2, port: opt Oid, CreateOnly),
        attr_field!(QueueAttribute, attr::INDEX, 3, index: opt U8, CreateOnly),
        attr_field!(QueueAttribute, attr::PARENT_SCHEDULER_NODE, 4, parent_scheduler_node: opt Oid, CreateAndSet),
        attr_field!(QueueAttribute, attr::WRED_PROFILE_ID, 5, wred_profile_id: opt Oid, CreateAndSet),
        attr_field!(QueueAttribute, attr::BUFFER_PROFILE_ID, 6, buffer_profile_id: opt Oid, CreateAndSet),
        attr_field!(QueueAttribute, attr::SCHEDULER_PROFILE_ID, 7, scheduler_profile_id: opt Oid, CreateAndSet),
        attr_field!(QueueAttribute, attr::PAUSE_STATUS, 8, pause_status: opt Bool, ReadOnly),
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
    use sai_types::{Attribute, AttributeValue, ObjectType};

    #[test]
    fn test_create_encoding() {
        let codec = Registry::builtin().codec(ObjectType::Queue).unwrap();
        let attrs = codec.encode(
            &[
                Attribute::new(attr::TYPE, AttributeValue::Enum(queue_type::UNICAST)),
                Attribute::new(attr::PORT, AttributeValue::Oid(7)),
                Attribute::new(attr::INDEX, AttributeValue::U8(3)),
            ],
            Purpose::Create,
        );
        assert_eq!(
            attrs.body,
            Some(Body::Queue(QueueAttribute {
                r#type: Some(QueueType::Unicast as i32),
                port: Some(7),
                index: Some(3),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_every_queue_type_is_mapped_past_unspecified() {
        for (sai, wire) in QUEUE_TYPE.pairs() {
            assert_eq!(*wire, sai + 1);
        }
    }
}
