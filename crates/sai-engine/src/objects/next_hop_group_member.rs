//! Next hop group member family. Served by the next hop group service.

use super::family_table;
use crate::attr_field;
use crate::registry::Family;
use crate::router::Operation;
use sai_proto::endpoints::next_hop_group as ep;
use sai_proto::NextHopGroupMemberAttribute;

/// `sai_next_hop_group_member_attr_t`
pub mod attr {
    use sai_types::AttributeId;

    pub const NEXT_HOP_GROUP_ID: AttributeId = 0;
    pub const NEXT_HOP_ID: AttributeId = 1;
    pub const WEIGHT: AttributeId = 2;
}

pub(crate) fn family() -> Family {
    let table = family_table!(NextHopGroupMember, NextHopGroupMemberAttribute, NextHopGroupMember, [
        attr_field!(NextHopGroupMemberAttribute, attr::NEXT_HOP_GROUP_ID, 1, next_hop_group_id: opt Oid, CreateOnly),
        attr_field!(NextHopGroupMemberAttribute, attr::NEXT_HOP_ID, 2, next_hop_id: opt Oid, CreateAndSet),
        attr_field!(NextHopGroupMemberAttribute, attr::WEIGHT, 3, weight: opt U32, CreateAndSet),
    ]);

    Family {
        codec: Box::new(table),
        routes: vec![
            (Operation::Create, ep::CREATE_MEMBER),
            (Operation::Remove, ep::REMOVE_MEMBER),
            (Operation::Set, ep::SET_MEMBER),
            (Operation::Get, ep::GET_MEMBER),
            (Operation::BulkCreate, ep::CREATE_MEMBERS),
            (Operation::BulkRemove, ep::REMOVE_MEMBER),
            (Operation::BulkSet, ep::SET_MEMBER),
        ],
        counters: None,
    }
}
