//! The translation facade: one method per SAI operation.
//!
//! Every call follows the same path. The router picks the endpoint, the
//! family's table builds the request, the transport sends it and the table
//! unpacks the reply. Unmapped (object type, operation) pairs fail with
//! `NotImplemented` before anything is sent.

use crate::bulk::{self, BulkResult, ErrorMode};
use crate::codec::EnumMap;
use crate::error::{SaiError, SaiResult};
use crate::notify::{PortStateCallback, PortStateNotifier};
use crate::objects::port;
use crate::registry::Registry;
use crate::request::{self, EntryKey, ObjectRef};
use crate::router::{Operation, Route};
use crate::table::ObjectCodec;
use crate::transport::{RpcRequest, RpcResponse, Transport};
use log::debug;
use sai_proto::{CreateBulkRequest, CreateRequest};
use sai_types::{Attribute, ObjectType, RawObjectId, NULL_OBJECT_ID};

/// `sai_stats_mode_t`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsMode {
    Read,
    ReadAndClear,
}

impl StatsMode {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(StatsMode::Read),
            1 => Some(StatsMode::ReadAndClear),
            _ => None,
        }
    }
}

/// Unwraps the expected response variant or reports what came back instead.
macro_rules! expect_response {
    ($endpoint:expr, $response:expr, $variant:ident) => {
        match $response {
            RpcResponse::$variant(inner) => Ok(inner),
            other => Err(SaiError::unexpected_response(
                $endpoint,
                format!("expected {} response, got {:?}", stringify!($variant), other),
            )),
        }
    };
}

/// Rejects a bulk item whose object type is not the one the call was routed for.
fn check_bulk_type(routed: ObjectType, item: ObjectType) -> SaiResult<()> {
    if routed == item {
        Ok(())
    } else {
        Err(SaiError::invalid_parameter(format!(
            "{} item in a {} bulk call",
            item, routed
        )))
    }
}

pub struct SaiAdapter<T: Transport> {
    transport: T,
    registry: &'static Registry,
    notifier: PortStateNotifier,
}

impl<T: Transport> SaiAdapter<T> {
    /// Adapter over the built-in families.
    pub fn new(transport: T) -> Self {
        Self::with_registry(transport, Registry::builtin())
    }

    pub fn with_registry(transport: T, registry: &'static Registry) -> Self {
        Self {
            transport,
            registry,
            notifier: PortStateNotifier::new(),
        }
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn route(&self, object_type: ObjectType, operation: Operation) -> SaiResult<Route> {
        self.registry.router().route(object_type, operation)
    }

    fn codec(&self, object_type: ObjectType) -> SaiResult<&'static dyn ObjectCodec> {
        self.registry
            .codec(object_type)
            .ok_or_else(|| SaiError::internal(format!("{} is routed but has no table", object_type)))
    }

    fn call(&self, route: &Route, request: RpcRequest) -> SaiResult<RpcResponse> {
        Ok(self.transport.call(route.endpoint, request)?)
    }

    fn send_create(&self, route: &Route, request: CreateRequest) -> SaiResult<RawObjectId> {
        let response = self.call(route, RpcRequest::Create(request))?;
        let response = expect_response!(route.endpoint, response, Create)?;
        Ok(response.oid)
    }

    /// Creates an object identified by object id and returns the id the
    /// engine assigned.
    ///
    /// `switch_id` is the owning switch, or null when creating the switch.
    pub fn create(
        &self,
        object_type: ObjectType,
        switch_id: RawObjectId,
        attrs: &[Attribute],
    ) -> SaiResult<RawObjectId> {
        let route = self.route(object_type, Operation::Create)?;
        if object_type.is_keyed_entry() {
            return Err(SaiError::invalid_parameter(format!(
                "{} is created by key",
                object_type
            )));
        }
        let codec = self.codec(object_type)?;
        let oid = self.send_create(
            &route,
            request::build_create_request(codec, switch_id, None, attrs),
        )?;
        debug!("created {} {:#x}", object_type, oid);
        Ok(oid)
    }

    /// Creates a keyed entry.
    pub fn create_entry(&self, key: &EntryKey, attrs: &[Attribute]) -> SaiResult<()> {
        let object_type = key.object_type();
        let route = self.route(object_type, Operation::Create)?;
        let codec = self.codec(object_type)?;
        self.send_create(
            &route,
            request::build_create_request(codec, key.switch_id(), Some(key), attrs),
        )?;
        debug!("created {} {:?}", object_type, key);
        Ok(())
    }

    pub fn remove(&self, target: ObjectRef<'_>) -> SaiResult<()> {
        let route = self.route(target.object_type(), Operation::Remove)?;
        self.remove_routed(&route, &target)
    }

    fn remove_routed(&self, route: &Route, target: &ObjectRef<'_>) -> SaiResult<()> {
        let request = request::build_remove_request(target, route)?;
        let response = self.call(route, RpcRequest::Remove(request))?;
        expect_response!(route.endpoint, response, Remove)?;
        Ok(())
    }

    /// Sets one attribute. Attributes the table does not know, or whose
    /// access class forbids a set, are dropped from the request.
    pub fn set_attribute(&self, target: ObjectRef<'_>, attr: &Attribute) -> SaiResult<()> {
        let route = self.route(target.object_type(), Operation::Set)?;
        self.set_routed(&route, &target, attr)
    }

    fn set_routed(&self, route: &Route, target: &ObjectRef<'_>, attr: &Attribute) -> SaiResult<()> {
        let codec = self.codec(target.object_type())?;
        let request = request::build_set_request(codec, target, route, attr)?;
        let response = self.call(route, RpcRequest::Set(request))?;
        expect_response!(route.endpoint, response, Set)?;
        Ok(())
    }

    /// Fills `attrs` in place and returns per slot whether it was filled.
    /// List slots receive at most their capacity and always report the true
    /// length. Slots of unknown ids or undecodable values keep their input.
    pub fn get_attribute(
        &self,
        target: ObjectRef<'_>,
        attrs: &mut [Attribute],
    ) -> SaiResult<Vec<bool>> {
        let object_type = target.object_type();
        let route = self.route(object_type, Operation::Get)?;
        let codec = self.codec(object_type)?;
        let ids: Vec<_> = attrs.iter().map(|attr| attr.id).collect();
        let request = request::build_get_request(codec, &target, &route, &ids)?;
        let response = self.call(&route, RpcRequest::Get(request))?;
        let response = expect_response!(route.endpoint, response, Get)?;
        Ok(request::unpack_get_response(codec, response, attrs))
    }

    fn counter_route(
        &self,
        object_type: ObjectType,
        operation: Operation,
        oid: RawObjectId,
    ) -> SaiResult<(Route, &'static EnumMap)> {
        let route = self.route(object_type, operation)?;
        let counters = self
            .registry
            .counters(object_type)
            .ok_or_else(|| SaiError::not_implemented(object_type, operation))?;
        if oid == NULL_OBJECT_ID {
            return Err(SaiError::invalid_parameter("object id is null"));
        }
        Ok((route, counters))
    }

    /// Reads counters, one value per requested counter id.
    pub fn get_stats(
        &self,
        object_type: ObjectType,
        oid: RawObjectId,
        counter_ids: &[i32],
    ) -> SaiResult<Vec<u64>> {
        let (route, counters) = self.counter_route(object_type, Operation::GetStats, oid)?;
        let request = request::build_stats_request(counters, oid, counter_ids)?;
        let response = self.call(&route, RpcRequest::GetStats(request))?;
        let response = expect_response!(route.endpoint, response, GetStats)?;
        request::unpack_stats_response(route.endpoint, response, counter_ids.len())
    }

    /// Like [`get_stats`](Self::get_stats); only [`StatsMode::Read`] is served.
    pub fn get_stats_ext(
        &self,
        object_type: ObjectType,
        oid: RawObjectId,
        counter_ids: &[i32],
        mode: StatsMode,
    ) -> SaiResult<Vec<u64>> {
        match mode {
            StatsMode::Read => self.get_stats(object_type, oid, counter_ids),
            StatsMode::ReadAndClear => {
                Err(SaiError::not_implemented(object_type, Operation::ClearStats))
            }
        }
    }

    pub fn clear_stats(
        &self,
        object_type: ObjectType,
        oid: RawObjectId,
        counter_ids: &[i32],
    ) -> SaiResult<()> {
        let (route, counters) = self.counter_route(object_type, Operation::ClearStats, oid)?;
        let request = request::build_clear_stats_request(counters, oid, counter_ids)?;
        let response = self.call(&route, RpcRequest::ClearStats(request))?;
        expect_response!(route.endpoint, response, ClearStats)?;
        Ok(())
    }

    fn send_create_bulk(
        &self,
        route: &Route,
        reqs: Vec<CreateRequest>,
    ) -> SaiResult<Vec<RawObjectId>> {
        let response = self.call(route, RpcRequest::CreateBulk(CreateBulkRequest { reqs }))?;
        let response = expect_response!(route.endpoint, response, CreateBulk)?;
        Ok(response.resps.into_iter().map(|resp| resp.oid).collect())
    }

    /// Creates `objects.len()` objects in one batched call.
    ///
    /// Fails as a whole only when the pair is not routed; everything else is
    /// reported per item.
    pub fn bulk_create(
        &self,
        object_type: ObjectType,
        switch_id: RawObjectId,
        objects: &[Vec<Attribute>],
        mode: ErrorMode,
    ) -> SaiResult<BulkResult<RawObjectId>> {
        self.bulk_create_with(object_type, switch_id, objects.len(), mode, |i| {
            Ok(objects[i].clone())
        })
    }

    /// Like [`bulk_create`](Self::bulk_create), with each item's attributes
    /// produced by `item`. An item whose attributes cannot be produced fails
    /// alone, under the error mode.
    pub fn bulk_create_with<F>(
        &self,
        object_type: ObjectType,
        switch_id: RawObjectId,
        len: usize,
        mode: ErrorMode,
        mut item: F,
    ) -> SaiResult<BulkResult<RawObjectId>>
    where
        F: FnMut(usize) -> SaiResult<Vec<Attribute>>,
    {
        let route = self.route(object_type, Operation::BulkCreate)?;
        let codec = self.codec(object_type)?;
        if object_type.is_keyed_entry() {
            return Err(SaiError::invalid_parameter(format!(
                "{} is created by key",
                object_type
            )));
        }
        Ok(bulk::run_batched(
            len,
            mode,
            |i| Ok(request::build_create_request(codec, switch_id, None, &item(i)?)),
            |reqs| self.send_create_bulk(&route, reqs),
        ))
    }

    /// Creates keyed entries of one type in one batched call.
    pub fn bulk_create_entries(
        &self,
        object_type: ObjectType,
        entries: &[(EntryKey, Vec<Attribute>)],
        mode: ErrorMode,
    ) -> SaiResult<BulkResult<()>> {
        self.bulk_create_entries_with(object_type, entries.len(), mode, |i| Ok(entries[i].clone()))
    }

    /// Like [`bulk_create_entries`](Self::bulk_create_entries), with each
    /// key and attribute list produced by `item`.
    pub fn bulk_create_entries_with<F>(
        &self,
        object_type: ObjectType,
        len: usize,
        mode: ErrorMode,
        mut item: F,
    ) -> SaiResult<BulkResult<()>>
    where
        F: FnMut(usize) -> SaiResult<(EntryKey, Vec<Attribute>)>,
    {
        let route = self.route(object_type, Operation::BulkCreate)?;
        let codec = self.codec(object_type)?;
        Ok(bulk::run_batched(
            len,
            mode,
            |i| {
                let (key, attrs) = item(i)?;
                check_bulk_type(object_type, key.object_type())?;
                Ok(request::build_create_request(codec, key.switch_id(), Some(&key), &attrs))
            },
            |reqs| {
                self.send_create_bulk(&route, reqs)
                    .map(|oids| vec![(); oids.len()])
            },
        ))
    }

    /// Removes each target with its own call, in order.
    pub fn bulk_remove(
        &self,
        object_type: ObjectType,
        targets: &[ObjectRef<'_>],
        mode: ErrorMode,
    ) -> SaiResult<BulkResult<()>> {
        self.bulk_remove_with(object_type, targets.len(), mode, |i| Ok(targets[i]))
    }

    /// Like [`bulk_remove`](Self::bulk_remove), with each target produced
    /// by `target`.
    pub fn bulk_remove_with<'t, F>(
        &self,
        object_type: ObjectType,
        len: usize,
        mode: ErrorMode,
        mut target: F,
    ) -> SaiResult<BulkResult<()>>
    where
        F: FnMut(usize) -> SaiResult<ObjectRef<'t>>,
    {
        let route = self.route(object_type, Operation::BulkRemove)?;
        Ok(bulk::run_sequential(len, mode, |i| {
            let target = target(i)?;
            check_bulk_type(object_type, target.object_type())?;
            self.remove_routed(&route, &target)
        }))
    }

    /// Sets `attrs[i]` on `targets[i]`, each with its own call, in order.
    pub fn bulk_set(
        &self,
        object_type: ObjectType,
        targets: &[ObjectRef<'_>],
        attrs: &[Attribute],
        mode: ErrorMode,
    ) -> SaiResult<BulkResult<()>> {
        if targets.len() != attrs.len() {
            return Err(SaiError::invalid_parameter(format!(
                "{} objects but {} attributes",
                targets.len(),
                attrs.len()
            )));
        }
        self.bulk_set_with(object_type, targets.len(), mode, |i| {
            Ok((targets[i], attrs[i].clone()))
        })
    }

    /// Like [`bulk_set`](Self::bulk_set), with each target and attribute
    /// produced by `item`.
    pub fn bulk_set_with<'t, F>(
        &self,
        object_type: ObjectType,
        len: usize,
        mode: ErrorMode,
        mut item: F,
    ) -> SaiResult<BulkResult<()>>
    where
        F: FnMut(usize) -> SaiResult<(ObjectRef<'t>, Attribute)>,
    {
        let route = self.route(object_type, Operation::BulkSet)?;
        Ok(bulk::run_sequential(len, mode, |i| {
            let (target, attr) = item(i)?;
            check_bulk_type(object_type, target.object_type())?;
            self.set_routed(&route, &target, &attr)
        }))
    }

    /// Installs the port state callback for `switch_id`.
    ///
    /// Fails with `AlreadyRegistered` while another callback is installed.
    pub fn register_port_state_callback(
        &self,
        switch_id: RawObjectId,
        callback: PortStateCallback,
    ) -> SaiResult<()> {
        self.notifier.register(
            |stop| Ok(self.transport.subscribe_port_state(switch_id, stop)?),
            &port::OPER_STATUS,
            callback,
        )
    }

    /// Returns false if no callback was installed.
    pub fn deregister_port_state_callback(&self) -> bool {
        self.notifier.deregister()
    }

    pub fn port_state_callback_registered(&self) -> bool {
        self.notifier.is_registered()
    }
}
