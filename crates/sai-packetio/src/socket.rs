//! Kernel side of the packet channel.

use crate::config::PacketIoConfig;
use crate::error::Result;
use crate::message::{self, FamilyInfo, GenlPacket};
use crate::registry::PacketSink;
use log::{debug, info};
use netlink_sys::{protocols::NETLINK_GENERIC, Socket, SocketAddr};

/// Generic netlink socket that multicasts packets to one group of a family.
pub struct GenlPacketSocket {
    socket: Socket,
    family: FamilyInfo,
    group_mask: u32,
    seq: u32,
}

impl GenlPacketSocket {
    /// Opens a socket and resolves the configured family and group.
    pub fn open(config: &PacketIoConfig) -> Result<Self> {
        let mut socket = Socket::new(NETLINK_GENERIC)?;
        socket.bind_auto()?;
        socket.connect(&SocketAddr::new(0, 0))?;

        let seq = 1;
        socket.send(&message::get_family_request(&config.family, seq)?, 0)?;
        let (reply, _) = socket.recv_from_full()?;
        let family = message::parse_family_reply(&reply, seq, &config.family)?;
        let group_id = family.group(&config.group)?;
        let group_mask = message::group_mask(group_id)?;

        info!(
            "packet channel on family {} (id {}) group {} (id {})",
            family.name, family.id, config.group, group_id
        );
        Ok(Self {
            socket,
            family,
            group_mask,
            seq,
        })
    }

    pub fn family(&self) -> &FamilyInfo {
        &self.family
    }
}

impl PacketSink for GenlPacketSocket {
    fn send(&mut self, packet: &GenlPacket) -> Result<()> {
        self.seq = self.seq.wrapping_add(1);
        let msg = message::packet_message(self.family.id, self.seq, packet)?;
        let sent = self
            .socket
            .send_to(&msg, &SocketAddr::new(0, self.group_mask), 0)?;
        debug!(
            "sent {} byte packet from ifindex {} ({} bytes on the wire)",
            packet.data.len(),
            packet.ingress_ifindex,
            sent
        );
        Ok(())
    }
}
