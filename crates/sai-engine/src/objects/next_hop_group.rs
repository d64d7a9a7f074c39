//! Next hop group family (`sainexthopgroup.h`).

use super::family_table;
use crate::attr_field;
use crate::codec::EnumMap;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::next_hop_group as ep;
use sai_proto::objects::NextHopGroupType;
use sai_proto::NextHopGroupAttribute;

/// `sai_next_hop_group_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const NEXT_HOP_COUNT: AttributeId = 0;
    pub const NEXT_HOP_MEMBER_LIST: AttributeId = 1;
    pub const TYPE: AttributeId = 2;
}

/// `sai_next_hop_group_type_t`
pub mod group_type {
    pub const DYNAMIC_UNORDERED_ECMP: i32 = 0;
    pub const DYNAMIC_ORDERED_ECMP: i32 = 1;
    pub const FINE_GRAIN_ECMP: i32 = 2;
    pub const PROTECTION: i32 = 3;
    pub const CLASS_BASED: i32 = 4;
}

static GROUP_TYPE: EnumMap = EnumMap::new(
    "sai_next_hop_group_type_t",
    &[
        (group_type::DYNAMIC_UNORDERED_ECMP, NextHopGroupType::DynamicUnorderedEcmp as i32),
        (group_type::DYNAMIC_ORDERED_ECMP, NextHopGroupType::DynamicOrderedEcmp as i32),
        (group_type::FINE_GRAIN_ECMP, NextHopGroupType::FineGrainEcmp as i32),
        (group_type::PROTECTION, NextHopGroupType::Protection as i32),
        (group_type::CLASS_BASED, NextHopGroupType::ClassBased as i32),
    ],
);

pub(crate) fn family() -> Family {
    let table = family_table!(NextHopGroup, NextHopGroupAttribute, NextHopGroup, [
        attr_field!(NextHopGroupAttribute, attr::NEXT_HOP_COUNT, 1, next_hop_count: opt U32, ReadOnly),
        attr_field!(NextHopGroupAttribute, attr::NEXT_HOP_MEMBER_LIST, 2, next_hop_member_list: rep OidList, ReadOnly),
        attr_field!(NextHopGroupAttribute, attr::TYPE, 3, r#type: opt Enum, CreateOnly, &GROUP_TYPE),
    ]);

    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE),
            (Operation::Remove, ep::REMOVE),
            (Operation::Get, ep::GET),
        ],
        counters: None,
    }
}
