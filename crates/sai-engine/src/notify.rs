//! Port state change notifications.
//!
//! One registration slot per adapter. Registering while a callback is
//! installed fails; the owner must deregister first. A listener thread
//! drains the server stream and hands each batch to the callback until the
//! registration is dropped or the stream ends. Dropping the registration
//! fires the stream's stop signal and joins the listener.

use crate::codec::EnumMap;
use crate::error::{SaiError, SaiResult};
use crate::transport::{PortStateStream, StopSignal};
use log::{debug, info, warn};
use sai_types::RawObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;

/// One port's new operational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortStateEvent {
    pub port_id: RawObjectId,
    /// `sai_port_oper_status_t`
    pub oper_status: i32,
}

/// Receives each batch of port state changes.
pub type PortStateCallback = Box<dyn Fn(&[PortStateEvent]) + Send + 'static>;

struct Registration {
    stopped: Arc<AtomicBool>,
    stop: Option<oneshot::Sender<()>>,
    listener: Option<JoinHandle<()>>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let Some(listener) = self.listener.take() else {
            return;
        };
        // Deregistering from inside the callback; the listener exits on its own.
        if listener.thread().id() == thread::current().id() {
            return;
        }
        if listener.join().is_err() {
            warn!("port state listener panicked");
        }
    }
}

/// Single-owner registration slot for the port state callback.
#[derive(Default)]
pub struct PortStateNotifier {
    slot: Mutex<Option<Registration>>,
}

impl PortStateNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `callback` and starts forwarding events from the stream
    /// `subscribe` opens. The stream must end once its stop signal fires.
    ///
    /// Fails with [`SaiError::AlreadyRegistered`] if a callback is installed;
    /// the stream is not opened in that case.
    pub fn register<S>(
        &self,
        subscribe: S,
        oper_status: &'static EnumMap,
        callback: PortStateCallback,
    ) -> SaiResult<()>
    where
        S: FnOnce(StopSignal) -> SaiResult<PortStateStream>,
    {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| SaiError::internal("port state slot poisoned"))?;
        if slot.is_some() {
            return Err(SaiError::AlreadyRegistered);
        }

        let (stop, signal) = oneshot::channel();
        let stream = subscribe(signal)?;
        let stopped = Arc::new(AtomicBool::new(false));
        let listener_stopped = Arc::clone(&stopped);
        let listener = thread::Builder::new()
            .name("sai-port-state".to_string())
            .spawn(move || listen(stream, oper_status, callback, listener_stopped))
            .map_err(|e| SaiError::internal(format!("port state listener: {}", e)))?;

        *slot = Some(Registration {
            stopped,
            stop: Some(stop),
            listener: Some(listener),
        });
        info!("port state callback registered");
        Ok(())
    }

    /// Removes the installed callback. Returns false if none was installed.
    ///
    /// Returns once the listener has exited, unless called from the
    /// callback itself. The callback is not invoked for batches that arrive
    /// afterwards.
    pub fn deregister(&self) -> bool {
        let registration = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        // Dropped outside the lock; the listener may be waiting on it.
        match registration {
            Some(registration) => {
                drop(registration);
                info!("port state callback deregistered");
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

fn listen(
    stream: PortStateStream,
    oper_status: &'static EnumMap,
    callback: PortStateCallback,
    stopped: Arc<AtomicBool>,
) {
    for batch in stream {
        if stopped.load(Ordering::SeqCst) {
            break;
        }
        let batch = match batch {
            Ok(batch) => batch,
            Err(e) => {
                warn!("port state stream failed: {}", e);
                break;
            }
        };
        let events: Vec<PortStateEvent> = batch
            .data
            .iter()
            .filter_map(|n| match oper_status.from_wire(n.port_state) {
                Ok(status) => Some(PortStateEvent {
                    port_id: n.port_id,
                    oper_status: status,
                }),
                Err(e) => {
                    warn!("dropping state of port {:#x}: {}", n.port_id, e);
                    None
                }
            })
            .collect();
        if !events.is_empty() {
            callback(&events);
        }
    }
    debug!("port state listener exiting");
}
