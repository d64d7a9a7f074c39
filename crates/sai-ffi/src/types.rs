//! C-compatible layouts of the SAI value types.
//!
//! These mirror `saitypes.h` for the members this layer reads and writes.
//! Which union member is active is never stored; it follows from the
//! attribute's declared kind.

use std::ffi::{c_char, c_void};

/// `sai_status_t`
pub type SaiStatusCode = i32;

/// `sai_object_list_t`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SaiObjectList {
    pub count: u32,
    pub list: *mut u64,
}

/// `sai_u32_list_t`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SaiU32List {
    pub count: u32,
    pub list: *mut u32,
}

/// `sai_s32_list_t`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SaiS32List {
    pub count: u32,
    pub list: *mut i32,
}

/// `sai_ip_addr_family_t`
pub const SAI_IP_ADDR_FAMILY_IPV4: i32 = 0;
pub const SAI_IP_ADDR_FAMILY_IPV6: i32 = 1;

/// `sai_ip_addr_t`. `ip4` holds the address in network byte order.
#[repr(C)]
#[derive(Clone, Copy)]
pub union SaiIpAddr {
    pub ip4: u32,
    pub ip6: [u8; 16],
}

/// `sai_ip_address_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SaiIpAddress {
    pub addr_family: i32,
    pub addr: SaiIpAddr,
}

/// `sai_ip_prefix_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SaiIpPrefix {
    pub addr_family: i32,
    pub addr: SaiIpAddr,
    pub mask: SaiIpAddr,
}

/// `sai_route_entry_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SaiRouteEntry {
    pub switch_id: u64,
    pub vr_id: u64,
    pub destination: SaiIpPrefix,
}

/// `sai_neighbor_entry_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SaiNeighborEntry {
    pub switch_id: u64,
    pub rif_id: u64,
    pub ip_address: SaiIpAddress,
}

/// `sai_attribute_value_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub union SaiAttributeValue {
    pub booldata: bool,
    pub u8: u8,
    pub s8: i8,
    pub u16: u16,
    pub s16: i16,
    pub u32: u32,
    pub s32: i32,
    pub u64: u64,
    pub s64: i64,
    pub mac: [u8; 6],
    pub ipaddr: SaiIpAddress,
    pub oid: u64,
    pub objlist: SaiObjectList,
    pub u32list: SaiU32List,
    pub s32list: SaiS32List,
    pub ptr: *mut c_void,
}

/// `sai_attribute_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SaiAttribute {
    pub id: u32,
    pub value: SaiAttributeValue,
}

/// `sai_port_oper_status_notification_t`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaiPortOperStatusNotification {
    pub port_id: u64,
    pub port_state: i32,
}

/// `sai_port_state_change_notification_fn`
pub type SaiPortStateChangeNotificationFn =
    unsafe extern "C" fn(count: u32, data: *const SaiPortOperStatusNotification);

/// `sai_profile_get_value_fn`
pub type SaiProfileGetValueFn =
    unsafe extern "C" fn(profile_id: u32, variable: *const c_char) -> *const c_char;

/// `sai_profile_get_next_value_fn`
pub type SaiProfileGetNextValueFn = unsafe extern "C" fn(
    profile_id: u32,
    variable: *mut *const c_char,
    value: *mut *const c_char,
) -> i32;

/// `sai_service_method_table_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SaiServiceMethodTable {
    pub profile_get_value: Option<SaiProfileGetValueFn>,
    pub profile_get_next_value: Option<SaiProfileGetNextValueFn>,
}
