//! Generic object entry points, addressed by object type and object id.

use crate::convert::{attribute_from_c, slot_from_c, value_to_c};
use crate::state::{self, run, Adapter};
use crate::types::{
    SaiAttribute, SaiPortOperStatusNotification, SaiPortStateChangeNotificationFn, SaiStatusCode,
};
use log::{debug, warn};
use sai_engine::objects::switch;
use sai_engine::{BulkResult, ErrorMode, ObjectRef, PortStateEvent, SaiError, SaiResult, StatsMode};
use sai_types::{Attribute, AttributeValue, ObjectType, RawObjectId};
use std::ffi::c_void;

pub(crate) fn object_type(raw: i32) -> SaiResult<ObjectType> {
    ObjectType::from_raw(raw).map_err(|e| SaiError::invalid_parameter(e.to_string()))
}

pub(crate) fn error_mode(raw: i32) -> SaiResult<ErrorMode> {
    ErrorMode::from_raw(raw)
        .ok_or_else(|| SaiError::invalid_parameter(format!("unknown bulk error mode {}", raw)))
}

/// Borrows `count` elements, rejecting a null pointer unless `count` is zero.
pub(crate) unsafe fn slice<'a, T>(ptr: *const T, count: u32) -> SaiResult<&'a [T]> {
    if count == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(SaiError::invalid_parameter("null array"));
    }
    Ok(std::slice::from_raw_parts(ptr, count as usize))
}

pub(crate) unsafe fn slice_mut<'a, T>(ptr: *mut T, count: u32) -> SaiResult<&'a mut [T]> {
    if count == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(SaiError::invalid_parameter("null array"));
    }
    Ok(std::slice::from_raw_parts_mut(ptr, count as usize))
}

/// Converts one caller attribute for a create or set.
///
/// An attribute the table does not know is passed through as a
/// placeholder; the table ignores it.
pub(crate) unsafe fn attribute_for(
    adapter: &Adapter,
    object_type: ObjectType,
    attr: &SaiAttribute,
) -> SaiResult<Attribute> {
    match adapter.registry().kind_of(object_type, attr.id) {
        Some(kind) => attribute_from_c(attr, kind),
        None => {
            debug!("{}: attribute {} has no table entry", object_type, attr.id);
            Ok(Attribute::new(attr.id, AttributeValue::Bool(false)))
        }
    }
}

pub(crate) unsafe fn attributes_from_c(
    adapter: &Adapter,
    object_type: ObjectType,
    attrs: &[SaiAttribute],
) -> SaiResult<Vec<Attribute>> {
    attrs
        .iter()
        .map(|attr| attribute_for(adapter, object_type, attr))
        .collect()
}

/// Fills caller attributes from the engine. Unknown ids and values the
/// engine sent in an undecodable form are left untouched.
pub(crate) unsafe fn get_into_c(
    adapter: &Adapter,
    target: ObjectRef<'_>,
    attrs: &mut [SaiAttribute],
) -> SaiResult<()> {
    let object_type = target.object_type();
    let kinds: Vec<_> = attrs
        .iter()
        .map(|attr| adapter.registry().kind_of(object_type, attr.id))
        .collect();
    let mut slots = attrs
        .iter()
        .zip(&kinds)
        .map(|(attr, kind)| match kind {
            Some(kind) => slot_from_c(attr, *kind),
            None => Ok(Attribute::new(attr.id, AttributeValue::Bool(false))),
        })
        .collect::<SaiResult<Vec<_>>>()?;

    let filled = adapter.get_attribute(target, &mut slots)?;

    for ((attr, slot), filled) in attrs.iter_mut().zip(&slots).zip(filled) {
        if filled {
            value_to_c(&slot.value, &mut attr.value);
        }
    }
    Ok(())
}

/// Writes per-item statuses and returns the aggregate.
pub(crate) fn finish_bulk<T>(
    result: SaiResult<BulkResult<T>>,
    statuses: &mut [SaiStatusCode],
) -> SaiResult<BulkResult<T>> {
    match result {
        Ok(result) => {
            for (out, status) in statuses.iter_mut().zip(&result.statuses) {
                *out = status.as_raw();
            }
            Ok(result)
        }
        Err(e) => {
            let status = e.status().as_raw();
            statuses.iter_mut().for_each(|out| *out = status);
            Err(e)
        }
    }
}

pub(crate) fn bulk_status<T>(result: &BulkResult<T>) -> SaiResult<()> {
    if result.status.is_success() {
        Ok(())
    } else {
        Err(SaiError::internal(format!(
            "{} of {} bulk items failed",
            result.failed(),
            result.len()
        )))
    }
}

/// Installs, or with a null pointer removes, the C port state callback.
unsafe fn apply_port_state_notify(
    adapter: &Adapter,
    switch_id: RawObjectId,
    pointer: *mut c_void,
) -> SaiResult<()> {
    if pointer.is_null() {
        adapter.deregister_port_state_callback();
        return Ok(());
    }
    // A non-null pointer in this attribute is the caller's notification function.
    let notify: SaiPortStateChangeNotificationFn = std::mem::transmute(pointer);
    adapter.register_port_state_callback(
        switch_id,
        Box::new(move |events: &[PortStateEvent]| {
            let data: Vec<SaiPortOperStatusNotification> = events
                .iter()
                .map(|event| SaiPortOperStatusNotification {
                    port_id: event.port_id,
                    port_state: event.oper_status,
                })
                .collect();
            let count = u32::try_from(data.len()).unwrap_or(u32::MAX);
            unsafe { notify(count, data.as_ptr()) };
        }),
    )
}

fn is_port_state_notify(object_type: ObjectType, attr: &SaiAttribute) -> bool {
    object_type == ObjectType::Switch && attr.id == switch::attr::PORT_STATE_CHANGE_NOTIFY
}

/// `create_object`
///
/// # Safety
///
/// `object_id` must be writable and `attr_list` must point at `attr_count`
/// attributes.
#[no_mangle]
pub unsafe extern "C" fn sai_create_object(
    object_type: i32,
    object_id: *mut u64,
    switch_id: u64,
    attr_count: u32,
    attr_list: *const SaiAttribute,
) -> SaiStatusCode {
    run("create_object", || {
        let adapter = state::current()?;
        let object_type = self::object_type(object_type)?;
        if object_id.is_null() {
            return Err(SaiError::invalid_parameter("object_id is null"));
        }
        let raw = slice(attr_list, attr_count)?;
        let notify = raw
            .iter()
            .find(|attr| is_port_state_notify(object_type, attr))
            .map(|attr| attr.value.ptr);
        let attrs = attributes_from_c(&adapter, object_type, raw)?;

        if notify.is_some_and(|pointer| !pointer.is_null())
            && adapter.port_state_callback_registered()
        {
            return Err(SaiError::AlreadyRegistered);
        }

        let oid = adapter.create(object_type, switch_id, &attrs)?;
        if let Some(pointer) = notify {
            if let Err(e) = apply_port_state_notify(&adapter, oid, pointer) {
                warn!("removing {} {:#x} after failed callback install: {}", object_type, oid, e);
                if let Err(remove) = adapter.remove(ObjectRef::Oid(object_type, oid)) {
                    warn!("{} {:#x} left behind: {}", object_type, oid, remove);
                }
                return Err(e);
            }
        }
        *object_id = oid;
        Ok(())
    })
}

/// `remove_object`
///
/// # Safety
///
/// Takes no pointers; unsafe only for ABI uniformity.
#[no_mangle]
pub unsafe extern "C" fn sai_remove_object(object_type: i32, object_id: u64) -> SaiStatusCode {
    run("remove_object", || {
        let adapter = state::current()?;
        adapter.remove(ObjectRef::Oid(self::object_type(object_type)?, object_id))
    })
}

/// `set_object_attribute`
///
/// # Safety
///
/// `attr` must point at one attribute.
#[no_mangle]
pub unsafe extern "C" fn sai_set_object_attribute(
    object_type: i32,
    object_id: u64,
    attr: *const SaiAttribute,
) -> SaiStatusCode {
    run("set_object_attribute", || {
        let adapter = state::current()?;
        let object_type = self::object_type(object_type)?;
        let attr = attr
            .as_ref()
            .ok_or_else(|| SaiError::invalid_parameter("attr is null"))?;
        if is_port_state_notify(object_type, attr) {
            return apply_port_state_notify(&adapter, object_id, attr.value.ptr);
        }
        let attrs = attributes_from_c(&adapter, object_type, std::slice::from_ref(attr))?;
        adapter.set_attribute(ObjectRef::Oid(object_type, object_id), &attrs[0])
    })
}

/// `get_object_attribute`
///
/// # Safety
///
/// `attr_list` must point at `attr_count` attributes whose list members
/// point at caller buffers of the stated counts.
#[no_mangle]
pub unsafe extern "C" fn sai_get_object_attribute(
    object_type: i32,
    object_id: u64,
    attr_count: u32,
    attr_list: *mut SaiAttribute,
) -> SaiStatusCode {
    run("get_object_attribute", || {
        let adapter = state::current()?;
        let object_type = self::object_type(object_type)?;
        let attrs = slice_mut(attr_list, attr_count)?;
        get_into_c(&adapter, ObjectRef::Oid(object_type, object_id), attrs)
    })
}

/// `get_object_stats`
///
/// # Safety
///
/// `counter_ids` and `counters` must hold `number_of_counters` elements.
#[no_mangle]
pub unsafe extern "C" fn sai_get_object_stats(
    object_type: i32,
    object_id: u64,
    number_of_counters: u32,
    counter_ids: *const i32,
    counters: *mut u64,
) -> SaiStatusCode {
    sai_get_object_stats_ext(object_type, object_id, number_of_counters, counter_ids, 0, counters)
}

/// `get_object_stats_ext`. Only `SAI_STATS_MODE_READ` is served.
///
/// # Safety
///
/// `counter_ids` and `counters` must hold `number_of_counters` elements.
#[no_mangle]
pub unsafe extern "C" fn sai_get_object_stats_ext(
    object_type: i32,
    object_id: u64,
    number_of_counters: u32,
    counter_ids: *const i32,
    mode: i32,
    counters: *mut u64,
) -> SaiStatusCode {
    run("get_object_stats", || {
        let adapter = state::current()?;
        let object_type = self::object_type(object_type)?;
        let mode = StatsMode::from_raw(mode)
            .ok_or_else(|| SaiError::invalid_parameter(format!("unknown stats mode {}", mode)))?;
        let ids = slice(counter_ids, number_of_counters)?;
        let out = slice_mut(counters, number_of_counters)?;
        let values = adapter.get_stats_ext(object_type, object_id, ids, mode)?;
        out.copy_from_slice(&values);
        Ok(())
    })
}

/// `clear_object_stats`
///
/// # Safety
///
/// `counter_ids` must hold `number_of_counters` elements.
#[no_mangle]
pub unsafe extern "C" fn sai_clear_object_stats(
    object_type: i32,
    object_id: u64,
    number_of_counters: u32,
    counter_ids: *const i32,
) -> SaiStatusCode {
    run("clear_object_stats", || {
        let adapter = state::current()?;
        let ids = slice(counter_ids, number_of_counters)?;
        adapter.clear_stats(self::object_type(object_type)?, object_id, ids)
    })
}

/// `bulk_object_create`
///
/// # Safety
///
/// `attr_count` and `attr_list` hold `object_count` elements, and
/// `attr_list[i]` points at `attr_count[i]` attributes. `object_id` and
/// `object_statuses` must be writable for `object_count` elements.
#[no_mangle]
pub unsafe extern "C" fn sai_bulk_object_create(
    object_type: i32,
    switch_id: u64,
    object_count: u32,
    attr_count: *const u32,
    attr_list: *const *const SaiAttribute,
    mode: i32,
    object_id: *mut u64,
    object_statuses: *mut SaiStatusCode,
) -> SaiStatusCode {
    run("bulk_object_create", || {
        let adapter = state::current()?;
        let object_type = self::object_type(object_type)?;
        let mode = error_mode(mode)?;
        let counts = slice(attr_count, object_count)?;
        let lists = slice(attr_list, object_count)?;
        let ids = slice_mut(object_id, object_count)?;
        let statuses = slice_mut(object_statuses, object_count)?;

        let result = finish_bulk(
            adapter.bulk_create_with(object_type, switch_id, counts.len(), mode, |i| {
                attributes_from_c(&adapter, object_type, slice(lists[i], counts[i])?)
            }),
            statuses,
        )?;
        ids.copy_from_slice(&result.outputs);
        bulk_status(&result)
    })
}

/// `bulk_object_remove`
///
/// # Safety
///
/// `object_id` and `object_statuses` hold `object_count` elements.
#[no_mangle]
pub unsafe extern "C" fn sai_bulk_object_remove(
    object_type: i32,
    object_count: u32,
    object_id: *const u64,
    mode: i32,
    object_statuses: *mut SaiStatusCode,
) -> SaiStatusCode {
    run("bulk_object_remove", || {
        let adapter = state::current()?;
        let object_type = self::object_type(object_type)?;
        let mode = error_mode(mode)?;
        let oids = slice(object_id, object_count)?;
        let statuses = slice_mut(object_statuses, object_count)?;

        let result = finish_bulk(
            adapter.bulk_remove_with(object_type, oids.len(), mode, |i| {
                Ok(ObjectRef::Oid(object_type, oids[i]))
            }),
            statuses,
        )?;
        bulk_status(&result)
    })
}

/// `bulk_object_set_attribute`
///
/// # Safety
///
/// `object_id`, `attr_list` and `object_statuses` hold `object_count`
/// elements.
#[no_mangle]
pub unsafe extern "C" fn sai_bulk_object_set_attribute(
    object_type: i32,
    object_count: u32,
    object_id: *const u64,
    attr_list: *const SaiAttribute,
    mode: i32,
    object_statuses: *mut SaiStatusCode,
) -> SaiStatusCode {
    run("bulk_object_set_attribute", || {
        let adapter = state::current()?;
        let object_type = self::object_type(object_type)?;
        let mode = error_mode(mode)?;
        let oids = slice(object_id, object_count)?;
        let attrs = slice(attr_list, object_count)?;
        let statuses = slice_mut(object_statuses, object_count)?;

        let result = finish_bulk(
            adapter.bulk_set_with(object_type, oids.len(), mode, |i| {
                Ok((
                    ObjectRef::Oid(object_type, oids[i]),
                    attribute_for(&adapter, object_type, &attrs[i])?,
                ))
            }),
            statuses,
        )?;
        bulk_status(&result)
    })
}
