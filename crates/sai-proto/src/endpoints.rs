//! RPC method paths, one module per service.
//!
//! Paths follow the gRPC convention `/<package>.<Service>/<Method>`.

/// Protobuf package every service lives in.
pub const PACKAGE: &str = "lemming.dataplane.sai";

macro_rules! service {
    ($(#[$doc:meta])* $module:ident => $service:literal {
        $( $name:ident => $method:literal, )*
    }) => {
        $(#[$doc])*
        pub mod $module {
            /// Fully qualified service name.
            pub const SERVICE: &str = concat!("lemming.dataplane.sai.", $service);
            $(
                pub const $name: &str =
                    concat!("/lemming.dataplane.sai.", $service, "/", $method);
            )*
        }
    };
}

service! {
    /// Switch service, including the port state stream.
    switch => "Switch" {
        CREATE => "CreateSwitch",
        REMOVE => "RemoveSwitch",
        SET => "SetSwitchAttribute",
        GET => "GetSwitchAttribute",
        PORT_STATE_CHANGE_NOTIFICATION => "PortStateChangeNotification",
    }
}

service! {
    port => "Port" {
        CREATE => "CreatePort",
        REMOVE => "RemovePort",
        SET => "SetPortAttribute",
        GET => "GetPortAttribute",
        GET_STATS => "GetPortStats",
        CLEAR_STATS => "ClearPortStats",
        CREATE_BULK => "CreatePorts",
    }
}

service! {
    queue => "Queue" {
        CREATE => "CreateQueue",
        REMOVE => "RemoveQueue",
        SET => "SetQueueAttribute",
        GET => "GetQueueAttribute",
        GET_STATS => "GetQueueStats",
        CLEAR_STATS => "ClearQueueStats",
    }
}

service! {
    virtual_router => "VirtualRouter" {
        CREATE => "CreateVirtualRouter",
        REMOVE => "RemoveVirtualRouter",
        SET => "SetVirtualRouterAttribute",
        GET => "GetVirtualRouterAttribute",
    }
}

service! {
    router_interface => "RouterInterface" {
        CREATE => "CreateRouterInterface",
        REMOVE => "RemoveRouterInterface",
        SET => "SetRouterInterfaceAttribute",
        GET => "GetRouterInterfaceAttribute",
        GET_STATS => "GetRouterInterfaceStats",
    }
}

service! {
    next_hop => "NextHop" {
        CREATE => "CreateNextHop",
        REMOVE => "RemoveNextHop",
        GET => "GetNextHopAttribute",
        CREATE_BULK => "CreateNextHops",
    }
}

service! {
    /// Next hop groups and their members share one service.
    next_hop_group => "NextHopGroup" {
        CREATE => "CreateNextHopGroup",
        REMOVE => "RemoveNextHopGroup",
        GET => "GetNextHopGroupAttribute",
        CREATE_MEMBER => "CreateNextHopGroupMember",
        REMOVE_MEMBER => "RemoveNextHopGroupMember",
        SET_MEMBER => "SetNextHopGroupMemberAttribute",
        GET_MEMBER => "GetNextHopGroupMemberAttribute",
        CREATE_MEMBERS => "CreateNextHopGroupMembers",
    }
}

service! {
    vlan => "Vlan" {
        CREATE => "CreateVlan",
        REMOVE => "RemoveVlan",
        GET => "GetVlanAttribute",
        GET_STATS => "GetVlanStats",
    }
}

service! {
    route => "Route" {
        CREATE => "CreateRouteEntry",
        REMOVE => "RemoveRouteEntry",
        SET => "SetRouteEntryAttribute",
        GET => "GetRouteEntryAttribute",
        CREATE_BULK => "CreateRouteEntries",
    }
}

service! {
    neighbor => "Neighbor" {
        CREATE => "CreateNeighborEntry",
        REMOVE => "RemoveNeighborEntry",
        SET => "SetNeighborEntryAttribute",
        GET => "GetNeighborEntryAttribute",
        CREATE_BULK => "CreateNeighborEntries",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paths_are_fully_qualified() {
        assert_eq!(queue::CREATE, "/lemming.dataplane.sai.Queue/CreateQueue");
        assert_eq!(
            next_hop_group::CREATE_MEMBERS,
            "/lemming.dataplane.sai.NextHopGroup/CreateNextHopGroupMembers"
        );
        assert!(route::SERVICE.starts_with(PACKAGE));
    }
}
