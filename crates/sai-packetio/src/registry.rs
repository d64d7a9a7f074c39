//! Open packet sinks keyed by opaque handles.

use crate::error::{PacketIoError, Result};
use crate::message::GenlPacket;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Handle returned by [`PacketIoRegistry::open`]. Never zero.
pub type PacketHandle = u64;

/// Destination of outbound packets.
pub trait PacketSink: Send {
    fn send(&mut self, packet: &GenlPacket) -> Result<()>;
}

pub struct PacketIoRegistry {
    sinks: Mutex<HashMap<PacketHandle, Box<dyn PacketSink>>>,
    next: AtomicU64,
}

impl Default for PacketIoRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketIoRegistry {
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(HashMap::new()),
            next: AtomicU64::new(1),
        }
    }

    /// Takes ownership of `sink` and returns its handle.
    pub fn open(&self, sink: Box<dyn PacketSink>) -> Result<PacketHandle> {
        let handle = self.next.fetch_add(1, Ordering::Relaxed);
        self.sinks
            .lock()
            .map_err(|_| PacketIoError::Poisoned)?
            .insert(handle, sink);
        debug!("opened packet handle {}", handle);
        Ok(handle)
    }

    pub fn send(&self, handle: PacketHandle, packet: &GenlPacket) -> Result<()> {
        let mut sinks = self.sinks.lock().map_err(|_| PacketIoError::Poisoned)?;
        let sink = sinks
            .get_mut(&handle)
            .ok_or(PacketIoError::UnknownHandle(handle))?;
        sink.send(packet).map_err(|e| {
            warn!("packet handle {}: {}", handle, e);
            e
        })
    }

    /// Drops the sink behind `handle`, closing its socket.
    pub fn close(&self, handle: PacketHandle) -> Result<()> {
        self.sinks
            .lock()
            .map_err(|_| PacketIoError::Poisoned)?
            .remove(&handle)
            .map(|_| debug!("closed packet handle {}", handle))
            .ok_or(PacketIoError::UnknownHandle(handle))
    }

    pub fn len(&self) -> usize {
        self.sinks.lock().map(|sinks| sinks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    struct Recorder(Arc<Mutex<Vec<GenlPacket>>>);

    impl PacketSink for Recorder {
        fn send(&mut self, packet: &GenlPacket) -> Result<()> {
            self.0.lock().unwrap().push(packet.clone());
            Ok(())
        }
    }

    fn packet(context: u32) -> GenlPacket {
        GenlPacket {
            ingress_ifindex: 2,
            egress_ifindex: 0,
            context,
            data: vec![0xde, 0xad],
        }
    }

    #[test]
    fn test_handles_route_to_their_sink() {
        let registry = PacketIoRegistry::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let a = registry.open(Box::new(Recorder(first.clone()))).unwrap();
        let b = registry.open(Box::new(Recorder(second.clone()))).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, 0);

        registry.send(b, &packet(7)).unwrap();
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(*second.lock().unwrap(), vec![packet(7)]);
    }

    #[test]
    fn test_closed_handle_is_unknown() {
        let registry = PacketIoRegistry::new();
        let handle = registry
            .open(Box::new(Recorder(Arc::new(Mutex::new(Vec::new())))))
            .unwrap();
        assert_eq!(registry.len(), 1);

        registry.close(handle).unwrap();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.send(handle, &packet(1)),
            Err(PacketIoError::UnknownHandle(h)) if h == handle
        ));
        assert!(matches!(
            registry.close(handle),
            Err(PacketIoError::UnknownHandle(_))
        ));
    }
}
