//! Value codec: tagged-union attribute values to typed wire fields and back.
//!
//! Every typed field of a generated message is reachable through one of the
//! [`Wire`] shapes, so the codec never has to know which message it is
//! writing into. Narrow integer kinds travel widened (`u8`/`u16` as `u32`,
//! `i8`/`i16` as `i32`) because protobuf has no narrower scalars.

use crate::error::CodecError;
use sai_types::{AttributeValue, BoundedList, IpAddress, MacAddress, ValueKind};

/// A value in the shape of one typed protobuf field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wire {
    Bool(bool),
    U32(u32),
    U64(u64),
    I32(i32),
    I64(i64),
    Bytes(Vec<u8>),
    U32List(Vec<u32>),
    I32List(Vec<i32>),
    U64List(Vec<u64>),
}

impl Wire {
    /// Number of elements for list shapes.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Wire::U32List(v) => Some(v.len()),
            Wire::I32List(v) => Some(v.len()),
            Wire::U64List(v) => Some(v.len()),
            _ => None,
        }
    }
}

/// Rust field types that can be written from and read into a [`Wire`].
pub trait WireField: Sized {
    fn from_wire(wire: Wire) -> Option<Self>;
    fn into_wire(self) -> Wire;
}

macro_rules! wire_field {
    ($( $ty:ty => $variant:ident ),* $(,)?) => {
        $(
            impl WireField for $ty {
                fn from_wire(wire: Wire) -> Option<Self> {
                    match wire {
                        Wire::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn into_wire(self) -> Wire {
                    Wire::$variant(self)
                }
            }
        )*
    };
}

wire_field! {
    bool => Bool,
    u32 => U32,
    u64 => U64,
    i32 => I32,
    i64 => I64,
    Vec<u8> => Bytes,
    Vec<u32> => U32List,
    Vec<i32> => I32List,
    Vec<u64> => U64List,
}

/// Explicit one-to-one mapping between SAI enum values and wire enum values.
///
/// Wire enums reserve 0 for "unspecified", so SAI value 0 usually maps to
/// wire value 1, but every pair is written out rather than derived.
#[derive(Debug)]
pub struct EnumMap {
    name: &'static str,
    pairs: &'static [(i32, i32)],
}

impl EnumMap {
    /// Creates a map from `(sai, wire)` pairs.
    pub const fn new(name: &'static str, pairs: &'static [(i32, i32)]) -> Self {
        Self { name, pairs }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pairs(&self) -> &'static [(i32, i32)] {
        self.pairs
    }

    /// SAI value to wire value.
    pub fn to_wire(&self, value: i32) -> Result<i32, CodecError> {
        self.pairs
            .iter()
            .find(|(sai, _)| *sai == value)
            .map(|(_, wire)| *wire)
            .ok_or(CodecError::UnmappedEnum {
                map: self.name,
                value,
            })
    }

    /// Wire value to SAI value.
    pub fn from_wire(&self, value: i32) -> Result<i32, CodecError> {
        self.pairs
            .iter()
            .find(|(_, wire)| *wire == value)
            .map(|(sai, _)| *sai)
            .ok_or(CodecError::UnmappedEnum {
                map: self.name,
                value,
            })
    }
}

fn enum_to_wire(map: Option<&EnumMap>, value: i32) -> Result<i32, CodecError> {
    match map {
        Some(map) => map.to_wire(value),
        None => Ok(value),
    }
}

fn enum_from_wire(map: Option<&EnumMap>, value: i32) -> Result<i32, CodecError> {
    match map {
        Some(map) => map.from_wire(value),
        None => Ok(value),
    }
}

/// Encodes a caller value into the wire shape of `kind`.
///
/// Enum kinds without a map pass through unchanged.
pub fn encode(
    value: &AttributeValue,
    kind: ValueKind,
    map: Option<&EnumMap>,
) -> Result<Wire, CodecError> {
    let wire = match (kind, value) {
        (ValueKind::Bool, AttributeValue::Bool(v)) => Wire::Bool(*v),
        (ValueKind::U8, AttributeValue::U8(v)) => Wire::U32(u32::from(*v)),
        (ValueKind::U16, AttributeValue::U16(v)) => Wire::U32(u32::from(*v)),
        (ValueKind::U32, AttributeValue::U32(v)) => Wire::U32(*v),
        (ValueKind::U64, AttributeValue::U64(v)) => Wire::U64(*v),
        (ValueKind::I8, AttributeValue::I8(v)) => Wire::I32(i32::from(*v)),
        (ValueKind::I16, AttributeValue::I16(v)) => Wire::I32(i32::from(*v)),
        (ValueKind::I32, AttributeValue::I32(v)) => Wire::I32(*v),
        (ValueKind::I64, AttributeValue::I64(v)) => Wire::I64(*v),
        (ValueKind::Mac, AttributeValue::Mac(mac)) => Wire::Bytes(mac.as_bytes().to_vec()),
        (ValueKind::Ip, AttributeValue::Ip(ip)) => Wire::Bytes(ip.octets()),
        (ValueKind::Oid, AttributeValue::Oid(oid)) => Wire::U64(*oid),
        (ValueKind::Enum, AttributeValue::Enum(v)) => Wire::I32(enum_to_wire(map, *v)?),
        (ValueKind::U32List, AttributeValue::U32List(list)) => {
            Wire::U32List(list.as_slice().to_vec())
        }
        (ValueKind::I32List, AttributeValue::I32List(list)) => {
            Wire::I32List(list.as_slice().to_vec())
        }
        (ValueKind::EnumList, AttributeValue::I32List(list)) => Wire::I32List(
            list.as_slice()
                .iter()
                .map(|v| enum_to_wire(map, *v))
                .collect::<Result<_, _>>()?,
        ),
        (ValueKind::OidList, AttributeValue::OidList(list)) => {
            Wire::U64List(list.as_slice().to_vec())
        }
        _ => return Err(CodecError::KindMismatch { kind }),
    };
    Ok(wire)
}

fn narrow<T, S>(kind: ValueKind, value: S) -> Result<T, CodecError>
where
    T: TryFrom<S>,
    S: Copy + Into<i64>,
{
    T::try_from(value).map_err(|_| CodecError::OutOfRange {
        kind,
        value: value.into(),
    })
}

/// Decodes a wire value into the caller's pre-sized output slot.
///
/// Scalars replace the slot. Lists keep the slot's capacity: at most
/// `capacity` elements are copied, and the true element count is recorded.
/// On error the slot is left untouched.
pub fn decode_into(
    wire: Wire,
    kind: ValueKind,
    map: Option<&EnumMap>,
    slot: &mut AttributeValue,
) -> Result<(), CodecError> {
    if !slot.fits(kind) {
        return Err(CodecError::KindMismatch { kind });
    }

    let value = match (kind, wire) {
        (ValueKind::Bool, Wire::Bool(v)) => AttributeValue::Bool(v),
        (ValueKind::U8, Wire::U32(v)) => AttributeValue::U8(narrow(kind, v)?),
        (ValueKind::U16, Wire::U32(v)) => AttributeValue::U16(narrow(kind, v)?),
        (ValueKind::U32, Wire::U32(v)) => AttributeValue::U32(v),
        (ValueKind::U64, Wire::U64(v)) => AttributeValue::U64(v),
        (ValueKind::I8, Wire::I32(v)) => AttributeValue::I8(narrow(kind, v)?),
        (ValueKind::I16, Wire::I32(v)) => AttributeValue::I16(narrow(kind, v)?),
        (ValueKind::I32, Wire::I32(v)) => AttributeValue::I32(v),
        (ValueKind::I64, Wire::I64(v)) => AttributeValue::I64(v),
        (ValueKind::Mac, Wire::Bytes(bytes)) => AttributeValue::Mac(
            MacAddress::from_slice(&bytes).map_err(|_| CodecError::MacLength(bytes.len()))?,
        ),
        (ValueKind::Ip, Wire::Bytes(bytes)) => AttributeValue::Ip(
            IpAddress::from_octets(&bytes).map_err(|_| CodecError::IpLength(bytes.len()))?,
        ),
        (ValueKind::Oid, Wire::U64(v)) => AttributeValue::Oid(v),
        (ValueKind::Enum, Wire::I32(v)) => AttributeValue::Enum(enum_from_wire(map, v)?),
        (ValueKind::U32List, Wire::U32List(items)) => {
            if let AttributeValue::U32List(list) = slot {
                list.fill(&items);
            }
            return Ok(());
        }
        (ValueKind::I32List, Wire::I32List(items)) => {
            if let AttributeValue::I32List(list) = slot {
                list.fill(&items);
            }
            return Ok(());
        }
        (ValueKind::EnumList, Wire::I32List(items)) => {
            let items = items
                .into_iter()
                .map(|v| enum_from_wire(map, v))
                .collect::<Result<Vec<_>, _>>()?;
            if let AttributeValue::I32List(list) = slot {
                list.fill(&items);
            }
            return Ok(());
        }
        (ValueKind::OidList, Wire::U64List(items)) => {
            if let AttributeValue::OidList(list) = slot {
                list.fill(&items);
            }
            return Ok(());
        }
        _ => return Err(CodecError::WireMismatch { kind }),
    };

    *slot = value;
    Ok(())
}

/// Decodes a wire value into a fresh value; lists get exactly enough room.
pub fn decode(
    wire: Wire,
    kind: ValueKind,
    map: Option<&EnumMap>,
) -> Result<AttributeValue, CodecError> {
    let mut slot = AttributeValue::empty(kind, wire.list_len().unwrap_or(0));
    decode_into(wire, kind, map, &mut slot)?;
    Ok(slot)
}

/// Builds an input list value, e.g. for a create request.
pub fn list<T: Clone>(items: Vec<T>) -> BoundedList<T> {
    BoundedList::from_vec(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::net::{Ipv4Addr, Ipv6Addr};

    static COLOR: EnumMap = EnumMap::new("color", &[(0, 1), (1, 2), (2, 3)]);

    fn round_trip(value: AttributeValue, kind: ValueKind) {
        let wire = encode(&value, kind, Some(&COLOR)).unwrap();
        let back = decode(wire, kind, Some(&COLOR)).unwrap();
        assert_eq!(back, value, "{:?}", kind);
    }

    #[test]
    fn test_scalar_round_trip_boundaries() {
        round_trip(AttributeValue::Bool(false), ValueKind::Bool);
        round_trip(AttributeValue::Bool(true), ValueKind::Bool);
        for v in [0, u8::MAX] {
            round_trip(AttributeValue::U8(v), ValueKind::U8);
        }
        for v in [0, u16::MAX] {
            round_trip(AttributeValue::U16(v), ValueKind::U16);
        }
        for v in [0, u32::MAX] {
            round_trip(AttributeValue::U32(v), ValueKind::U32);
        }
        for v in [0, u64::MAX] {
            round_trip(AttributeValue::U64(v), ValueKind::U64);
            round_trip(AttributeValue::Oid(v), ValueKind::Oid);
        }
        for v in [i8::MIN, 0, i8::MAX] {
            round_trip(AttributeValue::I8(v), ValueKind::I8);
        }
        for v in [i16::MIN, 0, i16::MAX] {
            round_trip(AttributeValue::I16(v), ValueKind::I16);
        }
        for v in [i32::MIN, 0, i32::MAX] {
            round_trip(AttributeValue::I32(v), ValueKind::I32);
        }
        for v in [i64::MIN, 0, i64::MAX] {
            round_trip(AttributeValue::I64(v), ValueKind::I64);
        }
    }

    #[test]
    fn test_address_round_trip() {
        round_trip(AttributeValue::Mac(MacAddress::ZERO), ValueKind::Mac);
        round_trip(
            AttributeValue::Mac(MacAddress::new([0xff; 6])),
            ValueKind::Mac,
        );
        round_trip(
            AttributeValue::Ip(IpAddress::V4(Ipv4Addr::new(10, 0, 0, 1))),
            ValueKind::Ip,
        );
        round_trip(
            AttributeValue::Ip(IpAddress::V6(Ipv6Addr::LOCALHOST)),
            ValueKind::Ip,
        );
    }

    #[test]
    fn test_list_round_trip() {
        round_trip(AttributeValue::U32List(list(vec![])), ValueKind::U32List);
        round_trip(
            AttributeValue::U32List(list((0..1024).collect())),
            ValueKind::U32List,
        );
        round_trip(
            AttributeValue::I32List(list(vec![i32::MIN, -1, i32::MAX])),
            ValueKind::I32List,
        );
        round_trip(
            AttributeValue::OidList(list(vec![0, 7, u64::MAX])),
            ValueKind::OidList,
        );
        round_trip(AttributeValue::I32List(list(vec![2, 0, 1])), ValueKind::EnumList);
    }

    #[test]
    fn test_enum_goes_through_map() {
        assert_eq!(
            encode(&AttributeValue::Enum(1), ValueKind::Enum, Some(&COLOR)),
            Ok(Wire::I32(2))
        );
        assert_eq!(
            decode(Wire::I32(3), ValueKind::Enum, Some(&COLOR)),
            Ok(AttributeValue::Enum(2))
        );
        assert_eq!(
            decode(Wire::I32(0), ValueKind::Enum, Some(&COLOR)),
            Err(CodecError::UnmappedEnum {
                map: "color",
                value: 0
            })
        );
        assert_eq!(
            encode(&AttributeValue::Enum(9), ValueKind::Enum, Some(&COLOR)),
            Err(CodecError::UnmappedEnum {
                map: "color",
                value: 9
            })
        );
    }

    #[test]
    fn test_mac_must_be_six_bytes() {
        for len in [0, 5, 7] {
            assert_eq!(
                decode(Wire::Bytes(vec![1; len]), ValueKind::Mac, None),
                Err(CodecError::MacLength(len))
            );
        }
    }

    #[test]
    fn test_ip_length_and_family() {
        assert_eq!(
            decode(Wire::Bytes(vec![1; 5]), ValueKind::Ip, None),
            Err(CodecError::IpLength(5))
        );
        let v6 = decode(Wire::Bytes(vec![0; 16]), ValueKind::Ip, None).unwrap();
        assert_eq!(v6, AttributeValue::Ip(IpAddress::V6(Ipv6Addr::UNSPECIFIED)));
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        assert_eq!(
            encode(&AttributeValue::U64(1), ValueKind::U32, None),
            Err(CodecError::KindMismatch {
                kind: ValueKind::U32
            })
        );
        assert_eq!(
            decode(Wire::U64(1), ValueKind::U32, None),
            Err(CodecError::WireMismatch {
                kind: ValueKind::U32
            })
        );
    }

    #[test]
    fn test_narrowing_out_of_range() {
        assert_eq!(
            decode(Wire::U32(256), ValueKind::U8, None),
            Err(CodecError::OutOfRange {
                kind: ValueKind::U8,
                value: 256
            })
        );
        assert_eq!(
            decode(Wire::I32(-129), ValueKind::I8, None),
            Err(CodecError::OutOfRange {
                kind: ValueKind::I8,
                value: -129
            })
        );
    }

    #[test]
    fn test_short_buffer_protocol() {
        let wire = Wire::U64List(vec![11, 12, 13]);

        let mut slot = AttributeValue::empty(ValueKind::OidList, 0);
        decode_into(wire.clone(), ValueKind::OidList, None, &mut slot).unwrap();
        let AttributeValue::OidList(ref sized) = slot else {
            panic!("slot changed variant");
        };
        assert_eq!(sized.count(), 3);
        assert!(sized.as_slice().is_empty());

        let mut slot = AttributeValue::empty(ValueKind::OidList, sized.count());
        decode_into(wire, ValueKind::OidList, None, &mut slot).unwrap();
        let AttributeValue::OidList(full) = slot else {
            panic!("slot changed variant");
        };
        assert_eq!(full.as_slice(), &[11, 12, 13]);
        assert!(!full.is_truncated());
    }

    #[test]
    fn test_failed_decode_leaves_slot_untouched() {
        let mut slot = AttributeValue::Mac(MacAddress::new([1, 2, 3, 4, 5, 6]));
        let before = slot.clone();
        assert!(decode_into(Wire::Bytes(vec![9; 4]), ValueKind::Mac, None, &mut slot).is_err());
        assert_eq!(slot, before);
    }
}
