//! Generic attribute representation carried by every SAI call.
//!
//! An [`Attribute`] pairs an [`AttributeId`] (scoped to an object type) with
//! an [`AttributeValue`]. Which variant of the value is valid is decided by the
//! [`ValueKind`] the attribute table declares for the id.

use crate::{IpAddress, MacAddress, RawObjectId};

/// Attribute identifier, scoped to one object type (`sai_attr_id_t`).
pub type AttributeId = u32;

/// Declared type of an attribute id.
///
/// `Enum` and `EnumList` carry object-type-specific 32-bit values whose wire
/// encoding goes through a per-enum mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Mac,
    Ip,
    Oid,
    Enum,
    U32List,
    I32List,
    EnumList,
    OidList,
}

impl ValueKind {
    /// Returns true for variable-length list kinds.
    pub const fn is_list(&self) -> bool {
        matches!(
            self,
            ValueKind::U32List | ValueKind::I32List | ValueKind::EnumList | ValueKind::OidList
        )
    }
}

/// A caller-owned, bounded list buffer.
///
/// Input lists (create/set) are built with [`BoundedList::from_vec`]. Output
/// lists (get) are built with [`BoundedList::with_capacity`]; decoding copies
/// at most `capacity` elements but always records the true element count, so
/// a caller can size a buffer with a zero-capacity query and then re-query.
///
/// ```
/// use sai_types::BoundedList;
///
/// let mut out: BoundedList<u32> = BoundedList::with_capacity(2);
/// out.fill(&[10, 20, 30]);
/// assert_eq!(out.as_slice(), &[10, 20]);
/// assert_eq!(out.count(), 3);
/// assert!(out.is_truncated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundedList<T> {
    items: Vec<T>,
    capacity: usize,
    count: usize,
}

impl<T: Clone> BoundedList<T> {
    /// Creates an empty output buffer that accepts up to `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            count: 0,
        }
    }

    /// Creates a fully populated list, e.g. for a create or set request.
    pub fn from_vec(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            items,
            capacity: count,
            count,
        }
    }

    /// Copies `min(capacity, source.len())` elements and records the true count.
    pub fn fill(&mut self, source: &[T]) {
        let copied = self.capacity.min(source.len());
        self.items.clear();
        self.items.extend_from_slice(&source[..copied]);
        self.count = source.len();
    }

    /// Maximum number of elements this buffer holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True element count reported by the last fill (may exceed capacity).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns true if the last fill had more elements than fit.
    pub fn is_truncated(&self) -> bool {
        self.count > self.items.len()
    }

    /// The elements actually stored in the buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consumes the buffer, returning the stored elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> From<Vec<T>> for BoundedList<T> {
    fn from(items: Vec<T>) -> Self {
        BoundedList::from_vec(items)
    }
}

/// Tagged-union attribute value (`sai_attribute_value_t`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Mac(MacAddress),
    Ip(IpAddress),
    Oid(RawObjectId),
    Enum(i32),
    U32List(BoundedList<u32>),
    I32List(BoundedList<i32>),
    OidList(BoundedList<RawObjectId>),
}

impl AttributeValue {
    /// Creates a zero-valued output slot for `kind`.
    ///
    /// List kinds get an empty buffer of `list_capacity` elements; scalar
    /// kinds ignore the capacity.
    pub fn empty(kind: ValueKind, list_capacity: usize) -> Self {
        match kind {
            ValueKind::Bool => AttributeValue::Bool(false),
            ValueKind::U8 => AttributeValue::U8(0),
            ValueKind::I8 => AttributeValue::I8(0),
            ValueKind::U16 => AttributeValue::U16(0),
            ValueKind::I16 => AttributeValue::I16(0),
            ValueKind::U32 => AttributeValue::U32(0),
            ValueKind::I32 => AttributeValue::I32(0),
            ValueKind::U64 => AttributeValue::U64(0),
            ValueKind::I64 => AttributeValue::I64(0),
            ValueKind::Mac => AttributeValue::Mac(MacAddress::ZERO),
            ValueKind::Ip => AttributeValue::Ip(IpAddress::V4(std::net::Ipv4Addr::UNSPECIFIED)),
            ValueKind::Oid => AttributeValue::Oid(0),
            ValueKind::Enum => AttributeValue::Enum(0),
            ValueKind::U32List => AttributeValue::U32List(BoundedList::with_capacity(list_capacity)),
            ValueKind::I32List | ValueKind::EnumList => {
                AttributeValue::I32List(BoundedList::with_capacity(list_capacity))
            }
            ValueKind::OidList => AttributeValue::OidList(BoundedList::with_capacity(list_capacity)),
        }
    }

    /// Returns true if this variant is a valid representation of `kind`.
    pub fn fits(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (AttributeValue::Bool(_), ValueKind::Bool)
                | (AttributeValue::U8(_), ValueKind::U8)
                | (AttributeValue::I8(_), ValueKind::I8)
                | (AttributeValue::U16(_), ValueKind::U16)
                | (AttributeValue::I16(_), ValueKind::I16)
                | (AttributeValue::U32(_), ValueKind::U32)
                | (AttributeValue::I32(_), ValueKind::I32)
                | (AttributeValue::U64(_), ValueKind::U64)
                | (AttributeValue::I64(_), ValueKind::I64)
                | (AttributeValue::Mac(_), ValueKind::Mac)
                | (AttributeValue::Ip(_), ValueKind::Ip)
                | (AttributeValue::Oid(_), ValueKind::Oid)
                | (AttributeValue::Enum(_), ValueKind::Enum)
                | (AttributeValue::U32List(_), ValueKind::U32List)
                | (AttributeValue::I32List(_), ValueKind::I32List | ValueKind::EnumList)
                | (AttributeValue::OidList(_), ValueKind::OidList)
        )
    }

    /// Capacity of a list value, or zero for scalars.
    pub fn list_capacity(&self) -> usize {
        match self {
            AttributeValue::U32List(list) => list.capacity(),
            AttributeValue::I32List(list) => list.capacity(),
            AttributeValue::OidList(list) => list.capacity(),
            _ => 0,
        }
    }
}

/// An (attribute id, value) pair (`sai_attribute_t`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: AttributeId,
    pub value: AttributeValue,
}

impl Attribute {
    /// Creates a new attribute.
    pub fn new(id: AttributeId, value: AttributeValue) -> Self {
        Self { id, value }
    }

    /// Creates an empty output slot for a get call.
    pub fn slot(id: AttributeId, kind: ValueKind, list_capacity: usize) -> Self {
        Self {
            id,
            value: AttributeValue::empty(kind, list_capacity),
        }
    }
}
