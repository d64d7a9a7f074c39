//! Object families.
//!
//! Each family declares its SAI attribute ids, the enum and counter
//! mappings it needs, its attribute table and the endpoints it wires. The
//! attribute ids follow `saiXXX.h` order for the subset carried here.

pub mod neighbor_entry;
pub mod next_hop;
pub mod next_hop_group;
pub mod next_hop_group_member;
pub mod port;
pub mod queue;
pub mod route_entry;
pub mod router_interface;
pub mod switch;
pub mod virtual_router;
pub mod vlan;

use crate::codec::EnumMap;
use crate::registry::Family;
use sai_proto::objects::PacketAction;

/// Builds the attribute table of one family.
macro_rules! family_table {
    ($object_type:ident, $msg:ty, $variant:ident, [ $( $field:expr ),* $(,)? ]) => {
        $crate::table::AttrTable::<$msg>::new(
            sai_types::ObjectType::$object_type,
            sai_proto::object_attributes::Body::$variant,
            |body| match body {
                sai_proto::object_attributes::Body::$variant(msg) => Some(msg),
                _ => None,
            },
            vec![ $( $field ),* ],
        )
    };
}

pub(crate) use family_table;

/// `sai_packet_action_t`
pub mod packet_action {
    pub const DROP: i32 = 0;
    pub const FORWARD: i32 = 1;
    pub const COPY: i32 = 2;
    pub const COPY_CANCEL: i32 = 3;
    pub const TRAP: i32 = 4;
    pub const LOG: i32 = 5;
    pub const DENY: i32 = 6;
    pub const TRANSIT: i32 = 7;
}

pub(crate) static PACKET_ACTION: EnumMap = EnumMap::new(
    "sai_packet_action_t",
    &[
        (packet_action::DROP, PacketAction::Drop as i32),
        (packet_action::FORWARD, PacketAction::Forward as i32),
        (packet_action::COPY, PacketAction::Copy as i32),
        (packet_action::COPY_CANCEL, PacketAction::CopyCancel as i32),
        (packet_action::TRAP, PacketAction::Trap as i32),
        (packet_action::LOG, PacketAction::Log as i32),
        (packet_action::DENY, PacketAction::Deny as i32),
        (packet_action::TRANSIT, PacketAction::Transit as i32),
    ],
);

/// Every built-in family.
pub(crate) fn families() -> Vec<Family> {
    vec![
        switch::family(),
        port::family(),
        queue::family(),
        virtual_router::family(),
        router_interface::family(),
        next_hop::family(),
        next_hop_group::family(),
        next_hop_group_member::family(),
        vlan::family(),
        route_entry::family(),
        neighbor_entry::family(),
    ]
}
