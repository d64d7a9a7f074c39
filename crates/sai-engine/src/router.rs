//! Dispatch router: (object type, operation) to remote endpoint.
//!
//! The table is static once built. Pairs that are not wired fail closed with
//! `NotImplemented`.

use crate::error::{SaiError, SaiResult};
use sai_types::ObjectType;
use std::collections::HashMap;
use std::fmt;

/// Operations the adapter dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Remove,
    Set,
    Get,
    GetStats,
    ClearStats,
    BulkCreate,
    BulkRemove,
    BulkSet,
}

impl Operation {
    pub const ALL: &'static [Operation] = &[
        Operation::Create,
        Operation::Remove,
        Operation::Set,
        Operation::Get,
        Operation::GetStats,
        Operation::ClearStats,
        Operation::BulkCreate,
        Operation::BulkRemove,
        Operation::BulkSet,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Remove => "remove",
            Operation::Set => "set",
            Operation::Get => "get",
            Operation::GetStats => "get_stats",
            Operation::ClearStats => "clear_stats",
            Operation::BulkCreate => "bulk_create",
            Operation::BulkRemove => "bulk_remove",
            Operation::BulkSet => "bulk_set",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a request identifies its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Bare 64-bit handle in the `oid` field.
    Oid,
    /// Structured key message in the `entry` field, on every request.
    Entry,
}

/// A wired endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub endpoint: &'static str,
    pub identifier: IdentifierKind,
}

/// Static routing table.
#[derive(Debug, Default)]
pub struct Router {
    routes: HashMap<(ObjectType, Operation), Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires `(object_type, operation)` to `endpoint`.
    ///
    /// The identifier kind follows the object type's category.
    pub fn register(&mut self, object_type: ObjectType, operation: Operation, endpoint: &'static str) {
        let identifier = if object_type.is_keyed_entry() {
            IdentifierKind::Entry
        } else {
            IdentifierKind::Oid
        };
        self.routes.insert(
            (object_type, operation),
            Route {
                endpoint,
                identifier,
            },
        );
    }

    /// Looks up the endpoint for an operation.
    pub fn route(&self, object_type: ObjectType, operation: Operation) -> SaiResult<Route> {
        self.routes
            .get(&(object_type, operation))
            .copied()
            .ok_or_else(|| SaiError::not_implemented(object_type, operation))
    }

    pub fn is_wired(&self, object_type: ObjectType, operation: Operation) -> bool {
        self.routes.contains_key(&(object_type, operation))
    }

    /// Object types with at least one wired operation.
    pub fn object_types(&self) -> Vec<ObjectType> {
        let mut types: Vec<_> = self.routes.keys().map(|(ot, _)| *ot).collect();
        types.sort();
        types.dedup();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sai_types::SaiStatus;

    #[test]
    fn test_identifier_kind_follows_category() {
        let mut router = Router::new();
        router.register(ObjectType::Queue, Operation::Create, "/q/Create");
        router.register(ObjectType::RouteEntry, Operation::Create, "/r/Create");

        assert_eq!(
            router.route(ObjectType::Queue, Operation::Create).unwrap(),
            Route {
                endpoint: "/q/Create",
                identifier: IdentifierKind::Oid
            }
        );
        assert_eq!(
            router
                .route(ObjectType::RouteEntry, Operation::Create)
                .unwrap()
                .identifier,
            IdentifierKind::Entry
        );
    }

    #[test]
    fn test_unmapped_pairs_fail_closed() {
        let mut router = Router::new();
        router.register(ObjectType::Vlan, Operation::Create, "/v/Create");

        for op in Operation::ALL.iter().filter(|op| **op != Operation::Create) {
            let err = router.route(ObjectType::Vlan, *op).unwrap_err();
            assert_eq!(err.status(), SaiStatus::NotImplemented, "{}", op);
        }
        assert!(router.route(ObjectType::Tunnel, Operation::Create).is_err());
        assert_eq!(router.object_types(), vec![ObjectType::Vlan]);
    }
}
