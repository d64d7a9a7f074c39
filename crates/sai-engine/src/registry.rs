//! Process-wide registry of attribute tables, routes and counter maps.
//!
//! Built once on first use and immutable afterwards, so concurrent readers
//! need no locking.

use crate::codec::EnumMap;
use crate::objects;
use crate::router::{Operation, Router};
use crate::table::ObjectCodec;
use once_cell::sync::Lazy;
use sai_types::{AttributeId, ObjectType, ValueKind};
use std::collections::HashMap;

/// What one object family contributes.
pub struct Family {
    pub codec: Box<dyn ObjectCodec>,
    pub routes: Vec<(Operation, &'static str)>,
    pub counters: Option<&'static EnumMap>,
}

pub struct Registry {
    codecs: HashMap<ObjectType, Box<dyn ObjectCodec>>,
    counters: HashMap<ObjectType, &'static EnumMap>,
    router: Router,
}

static BUILTIN: Lazy<Registry> = Lazy::new(|| Registry::from_families(objects::families()));

impl Registry {
    /// The registry of every built-in family.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    pub fn from_families(families: impl IntoIterator<Item = Family>) -> Self {
        let mut codecs = HashMap::new();
        let mut counters = HashMap::new();
        let mut router = Router::new();

        for family in families {
            let object_type = family.codec.object_type();
            for (operation, endpoint) in family.routes {
                router.register(object_type, operation, endpoint);
            }
            if let Some(map) = family.counters {
                counters.insert(object_type, map);
            }
            codecs.insert(object_type, family.codec);
        }

        Self {
            codecs,
            counters,
            router,
        }
    }

    pub fn codec(&self, object_type: ObjectType) -> Option<&dyn ObjectCodec> {
        self.codecs.get(&object_type).map(|codec| codec.as_ref())
    }

    pub fn counters(&self, object_type: ObjectType) -> Option<&'static EnumMap> {
        self.counters.get(&object_type).copied()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Declared kind of an attribute, if the object type's table knows it.
    pub fn kind_of(&self, object_type: ObjectType, id: AttributeId) -> Option<ValueKind> {
        self.codec(object_type)?.kind_of(id)
    }
}
