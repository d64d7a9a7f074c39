//! Conversion between the C layouts and the engine's value types.

use crate::types::{
    SaiAttribute, SaiAttributeValue, SaiIpAddr, SaiIpAddress, SaiIpPrefix, SaiNeighborEntry,
    SaiRouteEntry, SAI_IP_ADDR_FAMILY_IPV4, SAI_IP_ADDR_FAMILY_IPV6,
};
use sai_engine::{EntryKey, SaiError, SaiResult};
use sai_types::{
    Attribute, AttributeValue, BoundedList, IpAddress, IpPrefix, MacAddress, ValueKind,
};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ptr;

/// Copies a caller list. A non-empty list must not be null.
unsafe fn read_list<T: Copy>(count: u32, list: *const T) -> SaiResult<Vec<T>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if list.is_null() {
        return Err(SaiError::invalid_parameter("list pointer is null"));
    }
    Ok(std::slice::from_raw_parts(list, count as usize).to_vec())
}

/// Copies the stored elements into the caller's buffer and writes back the
/// true count.
unsafe fn write_list<T: Copy>(list: &BoundedList<T>, count: &mut u32, dst: *mut T) {
    let items = list.as_slice();
    if !items.is_empty() && !dst.is_null() {
        ptr::copy_nonoverlapping(items.as_ptr(), dst, items.len());
    }
    *count = u32::try_from(list.count()).unwrap_or(u32::MAX);
}

fn ip_from_c(family: i32, addr: &SaiIpAddr) -> SaiResult<IpAddress> {
    // The family selects the initialized member.
    match family {
        SAI_IP_ADDR_FAMILY_IPV4 => {
            let raw = unsafe { addr.ip4 };
            Ok(IpAddress::V4(Ipv4Addr::from(raw.to_ne_bytes())))
        }
        SAI_IP_ADDR_FAMILY_IPV6 => {
            let raw = unsafe { addr.ip6 };
            Ok(IpAddress::V6(Ipv6Addr::from(raw)))
        }
        other => Err(SaiError::invalid_parameter(format!(
            "unknown address family {}",
            other
        ))),
    }
}

fn ip_to_c(ip: &IpAddress) -> (i32, SaiIpAddr) {
    match ip {
        IpAddress::V4(addr) => {
            let mut raw = [0u8; 16];
            raw[..4].copy_from_slice(&addr.octets());
            (SAI_IP_ADDR_FAMILY_IPV4, SaiIpAddr { ip6: raw })
        }
        IpAddress::V6(addr) => (SAI_IP_ADDR_FAMILY_IPV6, SaiIpAddr { ip6: addr.octets() }),
    }
}

pub(crate) fn ip_address_from_c(addr: &SaiIpAddress) -> SaiResult<IpAddress> {
    ip_from_c(addr.addr_family, &addr.addr)
}

pub(crate) fn ip_address_to_c(ip: &IpAddress) -> SaiIpAddress {
    let (addr_family, addr) = ip_to_c(ip);
    SaiIpAddress { addr_family, addr }
}

pub(crate) fn ip_prefix_from_c(prefix: &SaiIpPrefix) -> SaiResult<IpPrefix> {
    let addr = ip_from_c(prefix.addr_family, &prefix.addr)?;
    let mask = ip_from_c(prefix.addr_family, &prefix.mask)?;
    IpPrefix::from_mask(addr, mask).map_err(|e| SaiError::invalid_parameter(e.to_string()))
}

pub(crate) fn route_entry_from_c(entry: &SaiRouteEntry) -> SaiResult<EntryKey> {
    Ok(EntryKey::Route {
        switch_id: entry.switch_id,
        vr_id: entry.vr_id,
        destination: ip_prefix_from_c(&entry.destination)?,
    })
}

pub(crate) fn neighbor_entry_from_c(entry: &SaiNeighborEntry) -> SaiResult<EntryKey> {
    Ok(EntryKey::Neighbor {
        switch_id: entry.switch_id,
        rif_id: entry.rif_id,
        ip: ip_address_from_c(&entry.ip_address)?,
    })
}

/// Reads the union member selected by `kind`.
///
/// # Safety
///
/// `attr.value` must hold that member, and list members must point at
/// `count` readable elements.
pub(crate) unsafe fn attribute_from_c(attr: &SaiAttribute, kind: ValueKind) -> SaiResult<Attribute> {
    let v = &attr.value;
    let value = match kind {
        ValueKind::Bool => AttributeValue::Bool(v.booldata),
        ValueKind::U8 => AttributeValue::U8(v.u8),
        ValueKind::I8 => AttributeValue::I8(v.s8),
        ValueKind::U16 => AttributeValue::U16(v.u16),
        ValueKind::I16 => AttributeValue::I16(v.s16),
        ValueKind::U32 => AttributeValue::U32(v.u32),
        ValueKind::I32 => AttributeValue::I32(v.s32),
        ValueKind::U64 => AttributeValue::U64(v.u64),
        ValueKind::I64 => AttributeValue::I64(v.s64),
        ValueKind::Mac => AttributeValue::Mac(MacAddress::new(v.mac)),
        ValueKind::Ip => AttributeValue::Ip(ip_address_from_c(&v.ipaddr)?),
        ValueKind::Oid => AttributeValue::Oid(v.oid),
        ValueKind::Enum => AttributeValue::Enum(v.s32),
        ValueKind::U32List => AttributeValue::U32List(BoundedList::from_vec(read_list(
            v.u32list.count,
            v.u32list.list,
        )?)),
        ValueKind::I32List | ValueKind::EnumList => AttributeValue::I32List(BoundedList::from_vec(
            read_list(v.s32list.count, v.s32list.list)?,
        )),
        ValueKind::OidList => AttributeValue::OidList(BoundedList::from_vec(read_list(
            v.objlist.count,
            v.objlist.list,
        )?)),
    };
    Ok(Attribute::new(attr.id, value))
}

/// Builds an output slot sized by the caller's list buffer.
///
/// # Safety
///
/// For list kinds `attr.value` must hold the list member.
pub(crate) unsafe fn slot_from_c(attr: &SaiAttribute, kind: ValueKind) -> SaiResult<Attribute> {
    let v = &attr.value;
    let (count, is_null) = match kind {
        ValueKind::U32List => (v.u32list.count, v.u32list.list.is_null()),
        ValueKind::I32List | ValueKind::EnumList => (v.s32list.count, v.s32list.list.is_null()),
        ValueKind::OidList => (v.objlist.count, v.objlist.list.is_null()),
        _ => (0, false),
    };
    if count > 0 && is_null {
        return Err(SaiError::invalid_parameter(format!(
            "attribute {} has a null list buffer",
            attr.id
        )));
    }
    Ok(Attribute::slot(attr.id, kind, count as usize))
}

/// Writes a decoded value into the caller's union.
///
/// # Safety
///
/// List values must come from a slot built by [`slot_from_c`] on the same
/// attribute, so they never exceed the caller's buffer.
pub(crate) unsafe fn value_to_c(value: &AttributeValue, out: &mut SaiAttributeValue) {
    match value {
        AttributeValue::Bool(v) => out.booldata = *v,
        AttributeValue::U8(v) => out.u8 = *v,
        AttributeValue::I8(v) => out.s8 = *v,
        AttributeValue::U16(v) => out.u16 = *v,
        AttributeValue::I16(v) => out.s16 = *v,
        AttributeValue::U32(v) => out.u32 = *v,
        AttributeValue::I32(v) => out.s32 = *v,
        AttributeValue::U64(v) => out.u64 = *v,
        AttributeValue::I64(v) => out.s64 = *v,
        AttributeValue::Mac(mac) => out.mac = *mac.as_bytes(),
        AttributeValue::Ip(ip) => out.ipaddr = ip_address_to_c(ip),
        AttributeValue::Oid(v) => out.oid = *v,
        AttributeValue::Enum(v) => out.s32 = *v,
        AttributeValue::U32List(list) => {
            let dst = out.u32list.list;
            write_list(list, &mut out.u32list.count, dst)
        }
        AttributeValue::I32List(list) => {
            let dst = out.s32list.list;
            write_list(list, &mut out.s32list.count, dst)
        }
        AttributeValue::OidList(list) => {
            let dst = out.objlist.list;
            write_list(list, &mut out.objlist.count, dst)
        }
    }
}
