//! Attribute tables: attribute id to typed field accessor, per object type.
//!
//! A table is data. The engine walks it; object families only fill it in.

use crate::codec::{self, EnumMap, Wire};
use log::{debug, warn};
use sai_proto::object_attributes::Body;
use sai_proto::ObjectAttributes;
use sai_types::{Attribute, AttributeId, AttributeValue, ObjectType, ValueKind};
use std::collections::HashMap;

/// When an attribute may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    CreateOnly,
    CreateAndSet,
    ReadOnly,
}

/// Which request an attribute list is being encoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Create,
    Set,
}

impl Access {
    pub fn allows(&self, purpose: Purpose) -> bool {
        match (self, purpose) {
            (Access::ReadOnly, _) => false,
            (Access::CreateOnly, Purpose::Set) => false,
            _ => true,
        }
    }
}

/// Accessor for one typed field of an attribute message.
pub struct AttrField<A> {
    pub id: AttributeId,
    pub name: &'static str,
    /// Field number in the attribute message; also the number a get request asks for.
    pub wire_id: i32,
    pub kind: ValueKind,
    pub access: Access,
    pub enum_map: Option<&'static EnumMap>,
    pub set: fn(&mut A, Wire) -> Option<()>,
    pub get: fn(&A) -> Option<Wire>,
}

/// Declares an [`AttrField`] for a field of an attribute message.
///
/// `opt` fields are `Option<T>` scalars, `rep` fields are repeated.
#[macro_export]
macro_rules! attr_field {
    (@map) => { None };
    (@map $map:expr) => { Some($map) };
    ($msg:ty, $id:expr, $wire:literal, $field:ident: opt $kind:ident, $access:ident $(, $map:expr)?) => {
        $crate::table::AttrField::<$msg> {
            id: $id,
            name: stringify!($field),
            wire_id: $wire,
            kind: sai_types::ValueKind::$kind,
            access: $crate::table::Access::$access,
            enum_map: $crate::attr_field!(@map $($map)?),
            set: |msg: &mut $msg, wire: $crate::codec::Wire| -> Option<()> {
                msg.$field = Some($crate::codec::WireField::from_wire(wire)?);
                Some(())
            },
            get: |msg: &$msg| -> Option<$crate::codec::Wire> {
                msg.$field.clone().map($crate::codec::WireField::into_wire)
            },
        }
    };
    ($msg:ty, $id:expr, $wire:literal, $field:ident: rep $kind:ident, $access:ident $(, $map:expr)?) => {
        $crate::table::AttrField::<$msg> {
            id: $id,
            name: stringify!($field),
            wire_id: $wire,
            kind: sai_types::ValueKind::$kind,
            access: $crate::table::Access::$access,
            enum_map: $crate::attr_field!(@map $($map)?),
            set: |msg: &mut $msg, wire: $crate::codec::Wire| -> Option<()> {
                msg.$field = $crate::codec::WireField::from_wire(wire)?;
                Some(())
            },
            get: |msg: &$msg| -> Option<$crate::codec::Wire> {
                Some($crate::codec::WireField::into_wire(msg.$field.clone()))
            },
        }
    };
}

/// Attribute table of one object type, bound to its attribute message `A`.
pub struct AttrTable<A: 'static> {
    object_type: ObjectType,
    fields: Vec<AttrField<A>>,
    index: HashMap<AttributeId, usize>,
    wrap: fn(A) -> Body,
    unwrap: fn(Body) -> Option<A>,
}

impl<A> AttrTable<A>
where
    A: prost::Message + Default + 'static,
{
    pub fn new(
        object_type: ObjectType,
        wrap: fn(A) -> Body,
        unwrap: fn(Body) -> Option<A>,
        fields: Vec<AttrField<A>>,
    ) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.id, i))
            .collect();
        Self {
            object_type,
            fields,
            index,
            wrap,
            unwrap,
        }
    }

    /// Returns the accessor for `id`, if the table declares one.
    pub fn field_for(&self, id: AttributeId) -> Option<&AttrField<A>> {
        self.index.get(&id).map(|&i| &self.fields[i])
    }

    fn encode_message(&self, attrs: &[Attribute], purpose: Purpose) -> A {
        let mut msg = A::default();
        for attr in attrs {
            let Some(field) = self.field_for(attr.id) else {
                debug!(
                    "{}: ignoring unknown attribute id {}",
                    self.object_type, attr.id
                );
                continue;
            };
            if !field.access.allows(purpose) {
                debug!(
                    "{}: ignoring {:?} attribute {} in {:?} request",
                    self.object_type, field.access, field.name, purpose
                );
                continue;
            }
            match codec::encode(&attr.value, field.kind, field.enum_map) {
                Ok(wire) => {
                    if (field.set)(&mut msg, wire).is_none() {
                        warn!(
                            "{}: field {} rejected a {:?} value",
                            self.object_type, field.name, field.kind
                        );
                    }
                }
                Err(e) => warn!(
                    "{}: cannot encode attribute {}: {}",
                    self.object_type, field.name, e
                ),
            }
        }
        msg
    }

    fn decode_message(&self, msg: &A, attrs: &mut [Attribute]) -> Vec<bool> {
        attrs
            .iter_mut()
            .map(|attr| {
                let Some(field) = self.field_for(attr.id) else {
                    debug!(
                        "{}: not emitting unknown attribute id {}",
                        self.object_type, attr.id
                    );
                    return false;
                };
                match (field.get)(msg) {
                    Some(wire) => {
                        match codec::decode_into(wire, field.kind, field.enum_map, &mut attr.value) {
                            Ok(()) => true,
                            Err(e) => {
                                warn!(
                                    "{}: cannot decode attribute {}: {}",
                                    self.object_type, field.name, e
                                );
                                false
                            }
                        }
                    }
                    None if attr.value.fits(field.kind) => {
                        attr.value = AttributeValue::empty(field.kind, attr.value.list_capacity());
                        true
                    }
                    None => {
                        warn!(
                            "{}: output slot for {} does not fit {:?}",
                            self.object_type, field.name, field.kind
                        );
                        false
                    }
                }
            })
            .collect()
    }
}

/// Object-safe view of an [`AttrTable`], so tables of different message
/// types can live in one registry.
pub trait ObjectCodec: Send + Sync {
    fn object_type(&self) -> ObjectType;

    /// Declared kind of `id`, if known.
    fn kind_of(&self, id: AttributeId) -> Option<ValueKind>;

    /// Encodes the attributes the table knows and `purpose` allows.
    fn encode(&self, attrs: &[Attribute], purpose: Purpose) -> ObjectAttributes;

    /// Wire numbers of the known ids among `ids`, in order.
    fn wire_ids(&self, ids: &[AttributeId]) -> Vec<i32>;

    /// Fills the caller's slots from a get response, in order, and returns
    /// per slot whether it was filled.
    ///
    /// Unknown ids and values that fail to decode are not filled. A known id
    /// missing from the response is reset to its kind's zero value.
    fn decode(&self, attributes: Option<ObjectAttributes>, attrs: &mut [Attribute]) -> Vec<bool>;
}

impl<A> ObjectCodec for AttrTable<A>
where
    A: prost::Message + Default + 'static,
{
    fn object_type(&self) -> ObjectType {
        self.object_type
    }

    fn kind_of(&self, id: AttributeId) -> Option<ValueKind> {
        self.field_for(id).map(|field| field.kind)
    }

    fn encode(&self, attrs: &[Attribute], purpose: Purpose) -> ObjectAttributes {
        ObjectAttributes::from((self.wrap)(self.encode_message(attrs, purpose)))
    }

    fn wire_ids(&self, ids: &[AttributeId]) -> Vec<i32> {
        ids.iter()
            .filter_map(|id| self.field_for(*id))
            .map(|field| field.wire_id)
            .collect()
    }

    fn decode(&self, attributes: Option<ObjectAttributes>, attrs: &mut [Attribute]) -> Vec<bool> {
        let msg = match attributes.and_then(|a| a.body) {
            Some(body) => match (self.unwrap)(body) {
                Some(msg) => msg,
                None => {
                    warn!("{}: response carries another family's attributes", self.object_type);
                    A::default()
                }
            },
            None => A::default(),
        };
        self.decode_message(&msg, attrs)
    }
}
