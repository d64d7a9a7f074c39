//! SAI object types and raw object identifiers.

use crate::ParseError;
use std::fmt;

/// Raw SAI object ID (matches `sai_object_id_t` in C).
///
/// Object IDs are owned by the forwarding engine; this layer never
/// interprets their bits.
pub type RawObjectId = u64;

/// The null object ID (`SAI_NULL_OBJECT_ID`).
pub const NULL_OBJECT_ID: RawObjectId = 0;

macro_rules! define_object_types {
    ($( $variant:ident = $value:literal => $name:literal, $keyed:literal; )*) => {
        /// SAI object type (`sai_object_type_t`).
        ///
        /// Keyed entries (route, neighbor, ...) are identified by a structured
        /// key instead of an object ID.
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ObjectType {
            $( $variant = $value, )*
        }

        impl ObjectType {
            /// Every object type known to this layer.
            pub const ALL: &'static [ObjectType] = &[$( ObjectType::$variant, )*];

            /// Creates an ObjectType from its raw `sai_object_type_t` value.
            pub fn from_raw(raw: i32) -> Result<Self, ParseError> {
                match raw {
                    $( $value => Ok(ObjectType::$variant), )*
                    other => Err(ParseError::UnknownObjectType(other)),
                }
            }

            /// Returns the SAI enum name, e.g. `SAI_OBJECT_TYPE_PORT`.
            pub const fn name(&self) -> &'static str {
                match self {
                    $( ObjectType::$variant => $name, )*
                }
            }

            /// Returns true if instances are identified by a structured key.
            pub const fn is_keyed_entry(&self) -> bool {
                match self {
                    $( ObjectType::$variant => $keyed, )*
                }
            }
        }
    };
}

define_object_types! {
    Null = 0 => "SAI_OBJECT_TYPE_NULL", false;
    Port = 1 => "SAI_OBJECT_TYPE_PORT", false;
    Lag = 2 => "SAI_OBJECT_TYPE_LAG", false;
    VirtualRouter = 3 => "SAI_OBJECT_TYPE_VIRTUAL_ROUTER", false;
    NextHop = 4 => "SAI_OBJECT_TYPE_NEXT_HOP", false;
    NextHopGroup = 5 => "SAI_OBJECT_TYPE_NEXT_HOP_GROUP", false;
    RouterInterface = 6 => "SAI_OBJECT_TYPE_ROUTER_INTERFACE", false;
    AclTable = 7 => "SAI_OBJECT_TYPE_ACL_TABLE", false;
    AclEntry = 8 => "SAI_OBJECT_TYPE_ACL_ENTRY", false;
    Hostif = 14 => "SAI_OBJECT_TYPE_HOSTIF", false;
    Policer = 18 => "SAI_OBJECT_TYPE_POLICER", false;
    Queue = 21 => "SAI_OBJECT_TYPE_QUEUE", false;
    Scheduler = 22 => "SAI_OBJECT_TYPE_SCHEDULER", false;
    BufferPool = 24 => "SAI_OBJECT_TYPE_BUFFER_POOL", false;
    LagMember = 27 => "SAI_OBJECT_TYPE_LAG_MEMBER", false;
    FdbEntry = 32 => "SAI_OBJECT_TYPE_FDB_ENTRY", true;
    Switch = 33 => "SAI_OBJECT_TYPE_SWITCH", false;
    NeighborEntry = 36 => "SAI_OBJECT_TYPE_NEIGHBOR_ENTRY", true;
    RouteEntry = 37 => "SAI_OBJECT_TYPE_ROUTE_ENTRY", true;
    Vlan = 38 => "SAI_OBJECT_TYPE_VLAN", false;
    VlanMember = 39 => "SAI_OBJECT_TYPE_VLAN_MEMBER", false;
    Tunnel = 42 => "SAI_OBJECT_TYPE_TUNNEL", false;
    NextHopGroupMember = 45 => "SAI_OBJECT_TYPE_NEXT_HOP_GROUP_MEMBER", false;
}

impl ObjectType {
    /// Returns the raw `sai_object_type_t` value.
    pub const fn as_raw(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for ObjectType {
    type Error = ParseError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        ObjectType::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_round_trip() {
        for object_type in ObjectType::ALL {
            assert_eq!(ObjectType::from_raw(object_type.as_raw()), Ok(*object_type));
        }
    }

    #[test]
    fn test_unknown_raw_value() {
        assert_eq!(ObjectType::from_raw(9999), Err(ParseError::UnknownObjectType(9999)));
    }

    #[test]
    fn test_keyed_entries() {
        assert!(ObjectType::RouteEntry.is_keyed_entry());
        assert!(ObjectType::NeighborEntry.is_keyed_entry());
        assert!(!ObjectType::Queue.is_keyed_entry());
        assert_eq!(ObjectType::Queue.to_string(), "SAI_OBJECT_TYPE_QUEUE");
    }
}
