//! Per-family attribute messages.
//!
//! Each family has one attribute message used for create, set and get.
//! Every wire enum reserves 0 for "unspecified".

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PortType {
    Unspecified = 0,
    Logical = 1,
    Cpu = 2,
    Fabric = 3,
    Recycle = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PortOperStatus {
    Unspecified = 0,
    Unknown = 1,
    Up = 2,
    Down = 3,
    Testing = 4,
    NotPresent = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PortFecMode {
    Unspecified = 0,
    None = 1,
    Rs = 2,
    Fc = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum QueueType {
    Unspecified = 0,
    All = 1,
    Unicast = 2,
    Multicast = 3,
    UnicastVoq = 4,
    MulticastVoq = 5,
    FabricTx = 6,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PacketAction {
    Unspecified = 0,
    Drop = 1,
    Forward = 2,
    Copy = 3,
    CopyCancel = 4,
    Trap = 5,
    Log = 6,
    Deny = 7,
    Transit = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum RouterInterfaceType {
    Unspecified = 0,
    Port = 1,
    Vlan = 2,
    Loopback = 3,
    MplsRouter = 4,
    SubPort = 5,
    Bridge = 6,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum NextHopType {
    Unspecified = 0,
    Ip = 1,
    Mpls = 2,
    TunnelEncap = 3,
    Srv6Sidlist = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum NextHopGroupType {
    Unspecified = 0,
    DynamicUnorderedEcmp = 1,
    DynamicOrderedEcmp = 2,
    FineGrainEcmp = 3,
    Protection = 4,
    ClassBased = 5,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SwitchAttribute {
    #[prost(uint32, optional, tag = "1")]
    pub port_number: Option<u32>,
    #[prost(uint64, repeated, tag = "2")]
    pub port_list: Vec<u64>,
    #[prost(uint64, optional, tag = "3")]
    pub cpu_port: Option<u64>,
    #[prost(uint64, optional, tag = "4")]
    pub default_virtual_router_id: Option<u64>,
    #[prost(uint64, optional, tag = "5")]
    pub default_vlan_id: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub src_mac_address: Option<Vec<u8>>,
    #[prost(bool, optional, tag = "7")]
    pub init_switch: Option<bool>,
    #[prost(uint32, optional, tag = "8")]
    pub ecmp_default_hash_seed: Option<u32>,
    #[prost(uint32, optional, tag = "9")]
    pub fdb_aging_time: Option<u32>,
    #[prost(int32, optional, tag = "10")]
    pub max_temp: Option<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PortAttribute {
    #[prost(enumeration = "PortType", optional, tag = "1")]
    pub r#type: Option<i32>,
    #[prost(enumeration = "PortOperStatus", optional, tag = "2")]
    pub oper_status: Option<i32>,
    #[prost(uint32, optional, tag = "3")]
    pub qos_number_of_queues: Option<u32>,
    #[prost(uint64, repeated, tag = "4")]
    pub qos_queue_list: Vec<u64>,
    #[prost(uint32, repeated, tag = "5")]
    pub supported_speed: Vec<u32>,
    #[prost(enumeration = "PortFecMode", repeated, tag = "6")]
    pub supported_fec_mode: Vec<i32>,
    #[prost(uint32, repeated, tag = "7")]
    pub hw_lane_list: Vec<u32>,
    #[prost(uint32, optional, tag = "8")]
    pub speed: Option<u32>,
    #[prost(bool, optional, tag = "9")]
    pub admin_state: Option<bool>,
    #[prost(uint32, optional, tag = "10")]
    pub mtu: Option<u32>,
    #[prost(enumeration = "PortFecMode", optional, tag = "11")]
    pub fec_mode: Option<i32>,
    #[prost(uint32, optional, tag = "12")]
    pub port_vlan_id: Option<u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueueAttribute {
    #[prost(enumeration = "QueueType", optional, tag = "1")]
    pub r#type: Option<i32>,
    #[prost(uint64, optional, tag = "2")]
    pub port: Option<u64>,
    #[prost(uint32, optional, tag = "3")]
    pub index: Option<u32>,
    #[prost(uint64, optional, tag = "4")]
    pub parent_scheduler_node: Option<u64>,
    #[prost(uint64, optional, tag = "5")]
    pub wred_profile_id: Option<u64>,
    #[prost(uint64, optional, tag = "6")]
    pub buffer_profile_id: Option<u64>,
    #[prost(uint64, optional, tag = "7")]
    pub scheduler_profile_id: Option<u64>,
    #[prost(bool, optional, tag = "8")]
    pub pause_status: Option<bool>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VirtualRouterAttribute {
    #[prost(bool, optional, tag = "1")]
    pub admin_v4_state: Option<bool>,
    #[prost(bool, optional, tag = "2")]
    pub admin_v6_state: Option<bool>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub src_mac_address: Option<Vec<u8>>,
    #[prost(enumeration = "PacketAction", optional, tag = "4")]
    pub violation_ttl1_packet_action: Option<i32>,
    #[prost(enumeration = "PacketAction", optional, tag = "5")]
    pub violation_ip_options_packet_action: Option<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RouterInterfaceAttribute {
    #[prost(uint64, optional, tag = "1")]
    pub virtual_router_id: Option<u64>,
    #[prost(enumeration = "RouterInterfaceType", optional, tag = "2")]
    pub r#type: Option<i32>,
    #[prost(uint64, optional, tag = "3")]
    pub port_id: Option<u64>,
    #[prost(uint64, optional, tag = "4")]
    pub vlan_id: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub src_mac_address: Option<Vec<u8>>,
    #[prost(bool, optional, tag = "6")]
    pub admin_v4_state: Option<bool>,
    #[prost(bool, optional, tag = "7")]
    pub admin_v6_state: Option<bool>,
    #[prost(uint32, optional, tag = "8")]
    pub mtu: Option<u32>,
    #[prost(uint32, optional, tag = "9")]
    pub outer_vlan_id: Option<u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct NextHopAttribute {
    #[prost(enumeration = "NextHopType", optional, tag = "1")]
    pub r#type: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub ip: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "3")]
    pub router_interface_id: Option<u64>,
    #[prost(uint64, optional, tag = "4")]
    pub tunnel_id: Option<u64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct NextHopGroupAttribute {
    #[prost(uint32, optional, tag = "1")]
    pub next_hop_count: Option<u32>,
    #[prost(uint64, repeated, tag = "2")]
    pub next_hop_member_list: Vec<u64>,
    #[prost(enumeration = "NextHopGroupType", optional, tag = "3")]
    pub r#type: Option<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct NextHopGroupMemberAttribute {
    #[prost(uint64, optional, tag = "1")]
    pub next_hop_group_id: Option<u64>,
    #[prost(uint64, optional, tag = "2")]
    pub next_hop_id: Option<u64>,
    #[prost(uint32, optional, tag = "3")]
    pub weight: Option<u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VlanAttribute {
    #[prost(uint32, optional, tag = "1")]
    pub vlan_id: Option<u32>,
    #[prost(uint64, repeated, tag = "2")]
    pub member_list: Vec<u64>,
    #[prost(uint32, optional, tag = "3")]
    pub max_learned_addresses: Option<u32>,
    #[prost(bool, optional, tag = "4")]
    pub learn_disable: Option<bool>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RouteEntryAttribute {
    #[prost(enumeration = "PacketAction", optional, tag = "1")]
    pub packet_action: Option<i32>,
    #[prost(uint64, optional, tag = "2")]
    pub user_trap_id: Option<u64>,
    #[prost(uint64, optional, tag = "3")]
    pub next_hop_id: Option<u64>,
    #[prost(uint32, optional, tag = "4")]
    pub meta_data: Option<u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct NeighborEntryAttribute {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub dst_mac_address: Option<Vec<u8>>,
    #[prost(enumeration = "PacketAction", optional, tag = "2")]
    pub packet_action: Option<i32>,
    #[prost(bool, optional, tag = "3")]
    pub no_host_route: Option<bool>,
    #[prost(uint32, optional, tag = "4")]
    pub meta_data: Option<u32>,
}

/// Attribute payload of any family.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectAttributes {
    #[prost(oneof = "object_attributes::Body", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11")]
    pub body: Option<object_attributes::Body>,
}

pub mod object_attributes {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "1")]
        Switch(super::SwitchAttribute),
        #[prost(message, tag = "2")]
        Port(super::PortAttribute),
        #[prost(message, tag = "3")]
        Queue(super::QueueAttribute),
        #[prost(message, tag = "4")]
        VirtualRouter(super::VirtualRouterAttribute),
        #[prost(message, tag = "5")]
        RouterInterface(super::RouterInterfaceAttribute),
        #[prost(message, tag = "6")]
        NextHop(super::NextHopAttribute),
        #[prost(message, tag = "7")]
        NextHopGroup(super::NextHopGroupAttribute),
        #[prost(message, tag = "8")]
        NextHopGroupMember(super::NextHopGroupMemberAttribute),
        #[prost(message, tag = "9")]
        Vlan(super::VlanAttribute),
        #[prost(message, tag = "10")]
        RouteEntry(super::RouteEntryAttribute),
        #[prost(message, tag = "11")]
        NeighborEntry(super::NeighborEntryAttribute),
    }
}

impl From<object_attributes::Body> for ObjectAttributes {
    fn from(body: object_attributes::Body) -> Self {
        ObjectAttributes { body: Some(body) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prost::Message;

    #[test]
    fn test_unset_optional_fields_are_absent_on_the_wire() {
        let attr = QueueAttribute {
            index: Some(3),
            ..Default::default()
        };
        let bytes = attr.encode_to_vec();
        let decoded = QueueAttribute::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.index, Some(3));
        assert_eq!(decoded.r#type, None);
        assert_eq!(decoded.port, None);
    }

    #[test]
    fn test_explicit_zero_survives_the_wire() {
        let attr = PortAttribute {
            admin_state: Some(false),
            mtu: Some(0),
            ..Default::default()
        };
        let decoded = PortAttribute::decode(attr.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.admin_state, Some(false));
        assert_eq!(decoded.mtu, Some(0));
    }

    #[test]
    fn test_oneof_body_round_trips() {
        let attrs = ObjectAttributes::from(object_attributes::Body::Vlan(VlanAttribute {
            vlan_id: Some(100),
            member_list: vec![1, 2],
            ..Default::default()
        }));
        let decoded = ObjectAttributes::decode(attrs.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, attrs);
    }
}
