//! The process-wide registry behind `open`, `send` and `close`.

use pretty_assertions::assert_eq;
use sai_packetio::{message, GenlPacket, PacketIoError, PacketSink};
use std::sync::{Arc, Mutex};

/// Encodes like a real socket would and keeps the bytes.
struct WireRecorder {
    family_id: u16,
    seq: u32,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl PacketSink for WireRecorder {
    fn send(&mut self, packet: &GenlPacket) -> sai_packetio::Result<()> {
        self.seq += 1;
        let msg = message::packet_message(self.family_id, self.seq, packet)?;
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }
}

#[test]
fn test_send_through_global_registry() {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let handle = sai_packetio::registry()
        .open(Box::new(WireRecorder {
            family_id: 0x1a,
            seq: 0,
            sent: sent.clone(),
        }))
        .unwrap();

    let packet = GenlPacket {
        ingress_ifindex: 5,
        egress_ifindex: 6,
        context: 1,
        data: b"frame".to_vec(),
    };
    sai_packetio::send(handle, &packet).unwrap();
    sai_packetio::send(handle, &packet).unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0][8..12], 1u32.to_ne_bytes());
    assert_eq!(sent[1][8..12], 2u32.to_ne_bytes());
    drop(sent);

    sai_packetio::close(handle).unwrap();
    assert!(matches!(
        sai_packetio::send(handle, &packet),
        Err(PacketIoError::UnknownHandle(_))
    ));
}

#[test]
fn test_unknown_handle_is_rejected() {
    assert!(matches!(
        sai_packetio::close(u64::MAX),
        Err(PacketIoError::UnknownHandle(u64::MAX))
    ));
}
