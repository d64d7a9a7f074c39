//! Process-wide adapter slot behind the C entry points.

use log::{error, info};
use once_cell::sync::Lazy;
use sai_engine::{SaiAdapter, SaiError, SaiResult, Transport};
use sai_types::SaiStatus;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

pub type Adapter = SaiAdapter<Arc<dyn Transport>>;

static ADAPTER: Lazy<RwLock<Option<Arc<Adapter>>>> = Lazy::new(|| RwLock::new(None));

/// Installs an adapter over `transport`. Fails if one is installed.
pub fn install(transport: Arc<dyn Transport>) -> SaiResult<()> {
    let mut slot = ADAPTER
        .write()
        .map_err(|_| SaiError::internal("adapter slot poisoned"))?;
    if slot.is_some() {
        return Err(SaiError::internal("already initialized"));
    }
    *slot = Some(Arc::new(SaiAdapter::new(transport)));
    info!("SAI adapter initialized");
    Ok(())
}

/// Removes the installed adapter. In-flight calls keep their reference.
pub fn uninstall() -> SaiResult<()> {
    let mut slot = ADAPTER
        .write()
        .map_err(|_| SaiError::internal("adapter slot poisoned"))?;
    let adapter = slot.take().ok_or(SaiError::Uninitialized)?;
    adapter.deregister_port_state_callback();
    info!("SAI adapter uninitialized");
    Ok(())
}

pub fn current() -> SaiResult<Arc<Adapter>> {
    ADAPTER
        .read()
        .map_err(|_| SaiError::internal("adapter slot poisoned"))?
        .clone()
        .ok_or(SaiError::Uninitialized)
}

/// Runs one ABI call and maps its outcome to a status code.
///
/// Panics are contained here; unwinding must not cross the C boundary.
pub(crate) fn run<F>(what: &str, call: F) -> i32
where
    F: FnOnce() -> SaiResult<()>,
{
    let status = match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => SaiStatus::Success,
        Ok(Err(e)) => {
            let status = e.status();
            if status == SaiStatus::NotImplemented {
                info!("{}: {}", what, e);
            } else {
                error!("{}: {}", what, e);
            }
            status
        }
        Err(_) => {
            error!("{}: panicked", what);
            SaiStatus::Failure
        }
    };
    status.as_raw()
}
