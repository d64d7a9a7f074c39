//! Packet channel of the SAI translation layer.
//!
//! Host interface packets are handed to the kernel as generic netlink
//! messages multicast to one group of a packet family. The family id and the
//! group id are resolved through the netlink controller when a socket opens.
//! Open sockets live in a process-wide registry keyed by opaque handles.
//!
//! Only the send path exists.

pub mod config;
pub mod error;
pub mod message;
pub mod registry;
#[cfg(target_os = "linux")]
pub mod socket;

pub use config::PacketIoConfig;
pub use error::{PacketIoError, Result};
pub use message::{FamilyInfo, GenlPacket};
pub use registry::{PacketHandle, PacketIoRegistry, PacketSink};
#[cfg(target_os = "linux")]
pub use socket::GenlPacketSocket;

use once_cell::sync::Lazy;

static REGISTRY: Lazy<PacketIoRegistry> = Lazy::new(PacketIoRegistry::new);

/// The process-wide handle registry.
pub fn registry() -> &'static PacketIoRegistry {
    &REGISTRY
}

/// Opens a generic netlink packet socket and registers it.
#[cfg(target_os = "linux")]
pub fn open(config: &PacketIoConfig) -> Result<PacketHandle> {
    let socket = GenlPacketSocket::open(config)?;
    registry().open(Box::new(socket))
}

pub fn send(handle: PacketHandle, packet: &GenlPacket) -> Result<()> {
    registry().send(handle, packet)
}

pub fn close(handle: PacketHandle) -> Result<()> {
    registry().close(handle)
}
