//! Keyed entry entry points (route and neighbor entries).

use crate::convert::{neighbor_entry_from_c, route_entry_from_c};
use crate::object_api::{
    attributes_from_c, bulk_status, error_mode, finish_bulk, get_into_c, slice, slice_mut,
};
use crate::state::{self, run};
use crate::types::{SaiAttribute, SaiNeighborEntry, SaiRouteEntry, SaiStatusCode};
use sai_engine::{EntryKey, ObjectRef, SaiError, SaiResult};
use sai_types::ObjectType;

unsafe fn key<E>(entry: *const E, from_c: fn(&E) -> SaiResult<EntryKey>) -> SaiResult<EntryKey> {
    let entry = entry
        .as_ref()
        .ok_or_else(|| SaiError::invalid_parameter("entry is null"))?;
    from_c(entry)
}

macro_rules! entry_api {
    (
        $object_type:ident, $entry:ty, $from_c:path,
        create: $create:ident,
        remove: $remove:ident,
        set: $set:ident,
        get: $get:ident,
        bulk_create: $bulk_create:ident,
        bulk_remove: $bulk_remove:ident $(,)?
    ) => {
        /// # Safety
        ///
        /// `entry` must point at one key and `attr_list` at `attr_count`
        /// attributes.
        #[no_mangle]
        pub unsafe extern "C" fn $create(
            entry: *const $entry,
            attr_count: u32,
            attr_list: *const SaiAttribute,
        ) -> SaiStatusCode {
            run(stringify!($create), || {
                let adapter = state::current()?;
                let key = key(entry, $from_c)?;
                let attrs =
                    attributes_from_c(&adapter, ObjectType::$object_type, slice(attr_list, attr_count)?)?;
                adapter.create_entry(&key, &attrs)
            })
        }

        /// # Safety
        ///
        /// `entry` must point at one key.
        #[no_mangle]
        pub unsafe extern "C" fn $remove(entry: *const $entry) -> SaiStatusCode {
            run(stringify!($remove), || {
                let adapter = state::current()?;
                let key = key(entry, $from_c)?;
                adapter.remove(ObjectRef::Entry(&key))
            })
        }

        /// # Safety
        ///
        /// `entry` and `attr` must each point at one element.
        #[no_mangle]
        pub unsafe extern "C" fn $set(entry: *const $entry, attr: *const SaiAttribute) -> SaiStatusCode {
            run(stringify!($set), || {
                let adapter = state::current()?;
                let key = key(entry, $from_c)?;
                let attr = attr
                    .as_ref()
                    .ok_or_else(|| SaiError::invalid_parameter("attr is null"))?;
                let attrs =
                    attributes_from_c(&adapter, ObjectType::$object_type, std::slice::from_ref(attr))?;
                adapter.set_attribute(ObjectRef::Entry(&key), &attrs[0])
            })
        }

        /// # Safety
        ///
        /// `entry` must point at one key and `attr_list` at `attr_count`
        /// attributes with valid list buffers.
        #[no_mangle]
        pub unsafe extern "C" fn $get(
            entry: *const $entry,
            attr_count: u32,
            attr_list: *mut SaiAttribute,
        ) -> SaiStatusCode {
            run(stringify!($get), || {
                let adapter = state::current()?;
                let key = key(entry, $from_c)?;
                get_into_c(&adapter, ObjectRef::Entry(&key), slice_mut(attr_list, attr_count)?)
            })
        }

        /// # Safety
        ///
        /// `entry`, `attr_count`, `attr_list` and `object_statuses` hold
        /// `object_count` elements; `attr_list[i]` points at `attr_count[i]`
        /// attributes.
        #[no_mangle]
        pub unsafe extern "C" fn $bulk_create(
            object_count: u32,
            entry: *const $entry,
            attr_count: *const u32,
            attr_list: *const *const SaiAttribute,
            mode: i32,
            object_statuses: *mut SaiStatusCode,
        ) -> SaiStatusCode {
            run(stringify!($bulk_create), || {
                let adapter = state::current()?;
                let mode = error_mode(mode)?;
                let keys = slice(entry, object_count)?;
                let counts = slice(attr_count, object_count)?;
                let lists = slice(attr_list, object_count)?;
                let statuses = slice_mut(object_statuses, object_count)?;

                let result = finish_bulk(
                    adapter.bulk_create_entries_with(ObjectType::$object_type, keys.len(), mode, |i| {
                        Ok((
                            $from_c(&keys[i])?,
                            attributes_from_c(
                                &adapter,
                                ObjectType::$object_type,
                                slice(lists[i], counts[i])?,
                            )?,
                        ))
                    }),
                    statuses,
                )?;
                bulk_status(&result)
            })
        }

        /// # Safety
        ///
        /// `entry` and `object_statuses` hold `object_count` elements.
        #[no_mangle]
        pub unsafe extern "C" fn $bulk_remove(
            object_count: u32,
            entry: *const $entry,
            mode: i32,
            object_statuses: *mut SaiStatusCode,
        ) -> SaiStatusCode {
            run(stringify!($bulk_remove), || {
                let adapter = state::current()?;
                let mode = error_mode(mode)?;
                // Keys are converted up front so targets can borrow them; a
                // key that fails to convert fails only its own item.
                let keys: Vec<SaiResult<EntryKey>> =
                    slice(entry, object_count)?.iter().map($from_c).collect();
                let statuses = slice_mut(object_statuses, object_count)?;

                let result = finish_bulk(
                    adapter.bulk_remove_with(ObjectType::$object_type, keys.len(), mode, |i| {
                        match &keys[i] {
                            Ok(key) => Ok(ObjectRef::Entry(key)),
                            Err(e) => Err(SaiError::invalid_parameter(format!("item {}: {}", i, e))),
                        }
                    }),
                    statuses,
                )?;
                bulk_status(&result)
            })
        }
    };
}

entry_api!(
    RouteEntry, SaiRouteEntry, route_entry_from_c,
    create: sai_create_route_entry,
    remove: sai_remove_route_entry,
    set: sai_set_route_entry_attribute,
    get: sai_get_route_entry_attribute,
    bulk_create: sai_bulk_create_route_entry,
    bulk_remove: sai_bulk_remove_route_entry,
);

entry_api!(
    NeighborEntry, SaiNeighborEntry, neighbor_entry_from_c,
    create: sai_create_neighbor_entry,
    remove: sai_remove_neighbor_entry,
    set: sai_set_neighbor_entry_attribute,
    get: sai_get_neighbor_entry_attribute,
    bulk_create: sai_bulk_create_neighbor_entry,
    bulk_remove: sai_bulk_remove_neighbor_entry,
);
