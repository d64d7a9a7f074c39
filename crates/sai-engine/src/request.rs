//! Request builder and response unpacker.
//!
//! Pure functions over an attribute table: no I/O, no state.

use crate::codec::EnumMap;
use crate::error::{SaiError, SaiResult};
use crate::router::{IdentifierKind, Route};
use crate::table::{ObjectCodec, Purpose};
use sai_proto::{
    ClearStatsRequest, CreateRequest, GetAttributeRequest, GetAttributeResponse, GetStatsRequest,
    GetStatsResponse, RemoveRequest, SetAttributeRequest,
};
use sai_types::{
    Attribute, AttributeId, IpAddress, IpPrefix, ObjectType, RawObjectId, NULL_OBJECT_ID,
};

/// Structured key of a keyed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKey {
    Route {
        switch_id: RawObjectId,
        vr_id: RawObjectId,
        destination: IpPrefix,
    },
    Neighbor {
        switch_id: RawObjectId,
        rif_id: RawObjectId,
        ip: IpAddress,
    },
}

impl EntryKey {
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryKey::Route { .. } => ObjectType::RouteEntry,
            EntryKey::Neighbor { .. } => ObjectType::NeighborEntry,
        }
    }

    pub fn switch_id(&self) -> RawObjectId {
        match self {
            EntryKey::Route { switch_id, .. } | EntryKey::Neighbor { switch_id, .. } => *switch_id,
        }
    }

    /// Wire form of the key.
    pub fn to_wire(&self) -> sai_proto::EntryKey {
        match self {
            EntryKey::Route {
                switch_id,
                vr_id,
                destination,
            } => sai_proto::RouteEntry {
                switch_id: *switch_id,
                vr_id: *vr_id,
                destination: Some(sai_proto::IpPrefix {
                    addr: destination.address().octets(),
                    mask: destination.mask().octets(),
                }),
            }
            .into(),
            EntryKey::Neighbor {
                switch_id,
                rif_id,
                ip,
            } => sai_proto::NeighborEntry {
                switch_id: *switch_id,
                rif_id: *rif_id,
                ip_address: ip.octets(),
            }
            .into(),
        }
    }
}

/// Target of a remove, set or get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRef<'a> {
    Oid(ObjectType, RawObjectId),
    Entry(&'a EntryKey),
}

impl ObjectRef<'_> {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectRef::Oid(object_type, _) => *object_type,
            ObjectRef::Entry(key) => key.object_type(),
        }
    }

    /// Identifier fields `(oid, entry)` for a request routed to `route`.
    fn identifier(&self, route: &Route) -> SaiResult<(RawObjectId, Option<sai_proto::EntryKey>)> {
        match (route.identifier, self) {
            (IdentifierKind::Oid, ObjectRef::Oid(_, NULL_OBJECT_ID)) => {
                Err(SaiError::invalid_parameter("object id is null"))
            }
            (IdentifierKind::Oid, ObjectRef::Oid(_, oid)) => Ok((*oid, None)),
            (IdentifierKind::Entry, ObjectRef::Entry(key)) => Ok((NULL_OBJECT_ID, Some(key.to_wire()))),
            (IdentifierKind::Oid, ObjectRef::Entry(key)) => Err(SaiError::invalid_parameter(format!(
                "{} is identified by object id, not by key",
                key.object_type()
            ))),
            (IdentifierKind::Entry, ObjectRef::Oid(object_type, _)) => Err(
                SaiError::invalid_parameter(format!("{} is identified by key", object_type)),
            ),
        }
    }
}

/// Builds a create request in one pass over `attrs`.
///
/// `switch_id` is the owning switch (null for the switch itself); keyed
/// entries also carry their key.
pub fn build_create_request(
    codec: &dyn ObjectCodec,
    switch_id: RawObjectId,
    entry: Option<&EntryKey>,
    attrs: &[Attribute],
) -> CreateRequest {
    CreateRequest {
        switch: switch_id,
        entry: entry.map(EntryKey::to_wire),
        attributes: Some(codec.encode(attrs, Purpose::Create)),
    }
}

pub fn build_remove_request(target: &ObjectRef<'_>, route: &Route) -> SaiResult<RemoveRequest> {
    let (oid, entry) = target.identifier(route)?;
    Ok(RemoveRequest { oid, entry })
}

/// Builds a set request for exactly one attribute.
pub fn build_set_request(
    codec: &dyn ObjectCodec,
    target: &ObjectRef<'_>,
    route: &Route,
    attr: &Attribute,
) -> SaiResult<SetAttributeRequest> {
    let (oid, entry) = target.identifier(route)?;
    Ok(SetAttributeRequest {
        oid,
        entry,
        attributes: Some(codec.encode(std::slice::from_ref(attr), Purpose::Set)),
    })
}

/// Asks for the wire fields of the known ids; unknown ids are not requested.
pub fn build_get_request(
    codec: &dyn ObjectCodec,
    target: &ObjectRef<'_>,
    route: &Route,
    ids: &[AttributeId],
) -> SaiResult<GetAttributeRequest> {
    let (oid, entry) = target.identifier(route)?;
    Ok(GetAttributeRequest {
        oid,
        entry,
        attr_type: codec.wire_ids(ids),
    })
}

/// Fills the caller's slots from a get response, in place and in order.
/// Returns per slot whether it was filled.
pub fn unpack_get_response(
    codec: &dyn ObjectCodec,
    response: GetAttributeResponse,
    attrs: &mut [Attribute],
) -> Vec<bool> {
    codec.decode(response.attributes, attrs)
}

fn wire_counters(counters: &EnumMap, ids: &[i32]) -> SaiResult<Vec<i32>> {
    ids.iter()
        .map(|id| {
            counters
                .to_wire(*id)
                .map_err(|_| SaiError::not_supported(format!("{} counter {}", counters.name(), id)))
        })
        .collect()
}

/// Builds a stats request. Every counter must be known, or the answer
/// could not be matched back to the caller's array.
pub fn build_stats_request(
    counters: &EnumMap,
    oid: RawObjectId,
    ids: &[i32],
) -> SaiResult<GetStatsRequest> {
    Ok(GetStatsRequest {
        oid,
        counter_ids: wire_counters(counters, ids)?,
    })
}

pub fn build_clear_stats_request(
    counters: &EnumMap,
    oid: RawObjectId,
    ids: &[i32],
) -> SaiResult<ClearStatsRequest> {
    Ok(ClearStatsRequest {
        oid,
        counter_ids: wire_counters(counters, ids)?,
    })
}

/// Returns the counter values, one per requested counter.
pub fn unpack_stats_response(
    endpoint: &'static str,
    response: GetStatsResponse,
    requested: usize,
) -> SaiResult<Vec<u64>> {
    if response.values.len() != requested {
        return Err(SaiError::unexpected_response(
            endpoint,
            format!(
                "{} counter values for {} counters",
                response.values.len(),
                requested
            ),
        ));
    }
    Ok(response.values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::router::Operation;
    use pretty_assertions::assert_eq;
    use sai_types::SaiStatus;
    use std::net::Ipv4Addr;

    fn route_key() -> EntryKey {
        EntryKey::Route {
            switch_id: 1,
            vr_id: 3,
            destination: IpPrefix::new(IpAddress::V4(Ipv4Addr::new(10, 1, 0, 0)), 16).unwrap(),
        }
    }

    #[test]
    fn test_route_key_to_wire() {
        let wire = route_key().to_wire();
        let Some(sai_proto::entry_key::Key::Route(route)) = wire.key else {
            panic!("expected a route key");
        };
        assert_eq!(route.vr_id, 3);
        let prefix = route.destination.unwrap();
        assert_eq!(prefix.addr, vec![10, 1, 0, 0]);
        assert_eq!(prefix.mask, vec![255, 255, 0, 0]);
    }

    #[test]
    fn test_identifier_follows_route() {
        let registry = Registry::builtin();
        let key = route_key();

        let route = registry
            .router()
            .route(ObjectType::RouteEntry, Operation::Remove)
            .unwrap();
        let req = build_remove_request(&ObjectRef::Entry(&key), &route).unwrap();
        assert_eq!(req.oid, NULL_OBJECT_ID);
        assert_eq!(req.entry, Some(key.to_wire()));

        let err = build_remove_request(&ObjectRef::Oid(ObjectType::RouteEntry, 5), &route);
        assert_eq!(err.unwrap_err().status(), SaiStatus::InvalidParameter);

        let route = registry
            .router()
            .route(ObjectType::Queue, Operation::Remove)
            .unwrap();
        let req = build_remove_request(&ObjectRef::Oid(ObjectType::Queue, 9), &route).unwrap();
        assert_eq!(req.oid, 9);
        assert_eq!(req.entry, None);

        let err = build_remove_request(&ObjectRef::Oid(ObjectType::Queue, NULL_OBJECT_ID), &route);
        assert_eq!(err.unwrap_err().status(), SaiStatus::InvalidParameter);
    }

    #[test]
    fn test_stats_request_rejects_unknown_counter() {
        static COUNTERS: EnumMap = EnumMap::new("stat", &[(0, 1), (1, 2)]);
        let req = build_stats_request(&COUNTERS, 4, &[1, 0]).unwrap();
        assert_eq!(req.counter_ids, vec![2, 1]);

        let err = build_stats_request(&COUNTERS, 4, &[0, 7]).unwrap_err();
        assert_eq!(err.status(), SaiStatus::NotSupported);
    }

    #[test]
    fn test_stats_response_length_must_match() {
        let response = GetStatsResponse {
            values: vec![1, 2],
        };
        assert_eq!(
            unpack_stats_response("/s", response.clone(), 2).unwrap(),
            vec![1, 2]
        );
        assert!(unpack_stats_response("/s", response, 3).is_err());
    }
}
