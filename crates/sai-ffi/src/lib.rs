//! C ABI of the SAI translation layer.
//!
//! A host loads this library as its SAI implementation. Every entry point
//! converts the C arguments, calls the process-wide [`SaiAdapter`] and maps
//! the outcome to a `sai_status_t`. Diagnostics go to the `log` facade;
//! callers only see status codes.
//!
//! # Safety
//!
//! All exported functions use the `extern "C"` ABI and follow these rules:
//!
//! 1. Null pointers are rejected with `SAI_STATUS_INVALID_PARAMETER`
//! 2. Arrays are only read or written within the counts passed alongside them
//! 3. Calls made before `sai_api_initialize` return `SAI_STATUS_UNINITIALIZED`
//! 4. Panics never unwind into the caller
//!
//! [`SaiAdapter`]: sai_engine::SaiAdapter

mod convert;
mod entry_api;
mod object_api;
mod state;
pub mod types;

pub use entry_api::*;
pub use object_api::*;
pub use state::{current, install, uninstall, Adapter};

use log::debug;
use sai_engine::{GrpcTransport, TransportConfig};
use std::ffi::{CStr, CString};
use std::sync::Arc;
use types::{SaiServiceMethodTable, SaiStatusCode};

/// Reads one profile key through the host's service table.
unsafe fn profile_value(services: &SaiServiceMethodTable, key: &str) -> Option<String> {
    let get = services.profile_get_value?;
    let key = CString::new(key).ok()?;
    let value = get(0, key.as_ptr());
    if value.is_null() {
        return None;
    }
    CStr::from_ptr(value).to_str().ok().map(str::to_string)
}

/// `sai_api_initialize`
///
/// Reads the transport settings from the host profile and connects lazily;
/// the first RPC establishes the channel. A null `services` table selects
/// the built-in defaults.
///
/// # Safety
///
/// `services`, if not null, must point at a valid service method table
/// whose functions return null or NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn sai_api_initialize(
    flags: u64,
    services: *const SaiServiceMethodTable,
) -> SaiStatusCode {
    state::run("api_initialize", || {
        debug!("initializing with flags {:#x}", flags);
        let services = services.as_ref();
        let config = TransportConfig::from_profile(|key| {
            services.and_then(|services| profile_value(services, key))
        })?;
        let transport = GrpcTransport::connect(&config)?;
        state::install(Arc::new(transport))
    })
}

/// `sai_api_uninitialize`
#[no_mangle]
pub extern "C" fn sai_api_uninitialize() -> SaiStatusCode {
    state::run("api_uninitialize", state::uninstall)
}
