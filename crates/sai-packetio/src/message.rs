//! Generic netlink encoding of packets and of the family lookup.
//!
//! ```text
//! nlmsghdr (16 bytes) | genlmsghdr (4 bytes) | attributes (TLV, 4-byte aligned)
//! ```
//!
//! Everything is host byte order, as netlink expects.

use crate::error::{PacketIoError, Result};
use byteorder::{ByteOrder, NativeEndian};
use netlink_packet_core::{NLMSG_DONE, NLMSG_ERROR, NLM_F_REQUEST};
use std::collections::HashMap;

/// Fixed id of the generic netlink controller.
pub const GENL_ID_CTRL: u16 = 0x10;

const NLMSG_HDRLEN: usize = 16;
const GENL_HDRLEN: usize = 4;
const NLA_HDRLEN: usize = 4;
const NLA_TYPE_MASK: u16 = 0x3fff;

const CTRL_CMD_GETFAMILY: u8 = 3;
const CTRL_VERSION: u8 = 1;
const CTRL_ATTR_FAMILY_ID: u16 = 1;
const CTRL_ATTR_FAMILY_NAME: u16 = 2;
const CTRL_ATTR_MCAST_GROUPS: u16 = 7;
const CTRL_ATTR_MCAST_GRP_NAME: u16 = 1;
const CTRL_ATTR_MCAST_GRP_ID: u16 = 2;

/// Command of a packet message.
pub const PACKET_CMD: u8 = 1;
pub const PACKET_VERSION: u8 = 1;

/// Attributes of a packet message.
pub mod packet_attr {
    pub const INGRESS_IFINDEX: u16 = 1;
    pub const EGRESS_IFINDEX: u16 = 2;
    pub const CONTEXT: u16 = 3;
    pub const DATA: u16 = 4;
}

const fn align(len: usize) -> usize {
    (len + 3) & !3
}

/// One packet handed to the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenlPacket {
    pub ingress_ifindex: u32,
    pub egress_ifindex: u32,
    /// Opaque cookie passed through to listeners
    pub context: u32,
    pub data: Vec<u8>,
}

/// A resolved generic netlink family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyInfo {
    pub id: u16,
    pub name: String,
    /// Multicast group name to group id
    pub mcast_groups: HashMap<String, u32>,
}

impl FamilyInfo {
    pub fn group(&self, name: &str) -> Result<u32> {
        self.mcast_groups
            .get(name)
            .copied()
            .ok_or_else(|| PacketIoError::GroupNotFound {
                family: self.name.clone(),
                group: name.to_string(),
            })
    }
}

/// Converts a group id into the `nl_groups` bit of a socket address.
pub fn group_mask(group_id: u32) -> Result<u32> {
    match group_id {
        1..=32 => Ok(1 << (group_id - 1)),
        other => Err(PacketIoError::GroupOutOfRange(other)),
    }
}

struct MessageBuilder {
    buf: Vec<u8>,
}

impl MessageBuilder {
    fn new(message_type: u16, seq: u32, cmd: u8, version: u8) -> Self {
        let mut buf = vec![0u8; NLMSG_HDRLEN + GENL_HDRLEN];
        NativeEndian::write_u16(&mut buf[4..6], message_type);
        NativeEndian::write_u16(&mut buf[6..8], NLM_F_REQUEST);
        NativeEndian::write_u32(&mut buf[8..12], seq);
        // Port id stays zero; the kernel fills in the sender.
        buf[NLMSG_HDRLEN] = cmd;
        buf[NLMSG_HDRLEN + 1] = version;
        Self { buf }
    }

    fn attr(&mut self, kind: u16, payload: &[u8]) -> Result<()> {
        let len = u16::try_from(NLA_HDRLEN + payload.len())
            .map_err(|_| PacketIoError::PacketTooLarge(payload.len()))?;
        let mut header = [0u8; NLA_HDRLEN];
        NativeEndian::write_u16(&mut header[0..2], len);
        NativeEndian::write_u16(&mut header[2..4], kind);
        self.buf.extend_from_slice(&header);
        self.buf.extend_from_slice(payload);
        self.buf.resize(align(self.buf.len()), 0);
        Ok(())
    }

    fn attr_u32(&mut self, kind: u16, value: u32) -> Result<()> {
        let mut payload = [0u8; 4];
        NativeEndian::write_u32(&mut payload, value);
        self.attr(kind, &payload)
    }

    fn finish(mut self) -> Vec<u8> {
        let len = u32::try_from(self.buf.len()).unwrap_or(u32::MAX);
        NativeEndian::write_u32(&mut self.buf[0..4], len);
        self.buf
    }
}

/// `CTRL_CMD_GETFAMILY` request for `name`.
pub fn get_family_request(name: &str, seq: u32) -> Result<Vec<u8>> {
    let mut builder = MessageBuilder::new(GENL_ID_CTRL, seq, CTRL_CMD_GETFAMILY, CTRL_VERSION);
    let mut family = name.as_bytes().to_vec();
    family.push(0);
    builder.attr(CTRL_ATTR_FAMILY_NAME, &family)?;
    Ok(builder.finish())
}

/// Encodes one packet for the family `family_id`.
pub fn packet_message(family_id: u16, seq: u32, packet: &GenlPacket) -> Result<Vec<u8>> {
    let mut builder = MessageBuilder::new(family_id, seq, PACKET_CMD, PACKET_VERSION);
    builder.attr_u32(packet_attr::INGRESS_IFINDEX, packet.ingress_ifindex)?;
    builder.attr_u32(packet_attr::EGRESS_IFINDEX, packet.egress_ifindex)?;
    builder.attr_u32(packet_attr::CONTEXT, packet.context)?;
    builder.attr(packet_attr::DATA, &packet.data)?;
    Ok(builder.finish())
}

struct AttrIter<'a> {
    data: &'a [u8],
}

impl<'a> AttrIter<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for AttrIter<'a> {
    type Item = Result<(u16, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.len() < NLA_HDRLEN {
            return None;
        }
        let len = usize::from(NativeEndian::read_u16(&self.data[0..2]));
        let kind = NativeEndian::read_u16(&self.data[2..4]) & NLA_TYPE_MASK;
        if len < NLA_HDRLEN || len > self.data.len() {
            self.data = &[];
            return Some(Err(PacketIoError::Malformed(format!(
                "attribute {} has length {}",
                kind, len
            ))));
        }
        let payload = &self.data[NLA_HDRLEN..len];
        self.data = &self.data[align(len).min(self.data.len())..];
        Some(Ok((kind, payload)))
    }
}

fn read_u16(payload: &[u8]) -> Result<u16> {
    if payload.len() < 2 {
        return Err(PacketIoError::Malformed("short u16 attribute".into()));
    }
    Ok(NativeEndian::read_u16(payload))
}

fn read_u32(payload: &[u8]) -> Result<u32> {
    if payload.len() < 4 {
        return Err(PacketIoError::Malformed("short u32 attribute".into()));
    }
    Ok(NativeEndian::read_u32(payload))
}

fn read_string(payload: &[u8]) -> Result<String> {
    let end = payload.iter().position(|b| *b == 0).unwrap_or(payload.len());
    String::from_utf8(payload[..end].to_vec())
        .map_err(|_| PacketIoError::Malformed("attribute is not UTF-8".into()))
}

/// Parses the controller's answer to [`get_family_request`].
///
/// Messages with another sequence number are skipped.
pub fn parse_family_reply(buf: &[u8], seq: u32, name: &str) -> Result<FamilyInfo> {
    let mut rest = buf;
    while rest.len() >= NLMSG_HDRLEN {
        let len = usize::try_from(NativeEndian::read_u32(&rest[0..4])).unwrap_or(usize::MAX);
        if len < NLMSG_HDRLEN || len > rest.len() {
            return Err(PacketIoError::Malformed(format!("message length {}", len)));
        }
        let message_type = NativeEndian::read_u16(&rest[4..6]);
        let message_seq = NativeEndian::read_u32(&rest[8..12]);
        let payload = &rest[NLMSG_HDRLEN..len];
        rest = &rest[align(len).min(rest.len())..];

        if message_seq != seq {
            continue;
        }
        match message_type {
            NLMSG_ERROR => {
                // nlmsgerr carries the negated errno
                let errno = (read_u32(payload)? as i32).wrapping_neg();
                match errno {
                    0 => continue,
                    libc::ENOENT => return Err(PacketIoError::FamilyNotFound(name.to_string())),
                    other => return Err(PacketIoError::Kernel(other)),
                }
            }
            NLMSG_DONE => continue,
            _ => {
                if payload.len() < GENL_HDRLEN {
                    return Err(PacketIoError::Malformed("generic netlink header too short".into()));
                }
                return parse_family_attrs(&payload[GENL_HDRLEN..], name);
            }
        }
    }
    Err(PacketIoError::FamilyNotFound(name.to_string()))
}

fn parse_family_attrs(data: &[u8], name: &str) -> Result<FamilyInfo> {
    let mut id = None;
    let mut family_name = name.to_string();
    let mut mcast_groups = HashMap::new();

    for attr in AttrIter::new(data) {
        let (kind, payload) = attr?;
        match kind {
            CTRL_ATTR_FAMILY_ID => id = Some(read_u16(payload)?),
            CTRL_ATTR_FAMILY_NAME => family_name = read_string(payload)?,
            CTRL_ATTR_MCAST_GROUPS => {
                for group in AttrIter::new(payload) {
                    let (_, group) = group?;
                    let mut group_name = None;
                    let mut group_id = None;
                    for attr in AttrIter::new(group) {
                        let (kind, payload) = attr?;
                        match kind {
                            CTRL_ATTR_MCAST_GRP_NAME => group_name = Some(read_string(payload)?),
                            CTRL_ATTR_MCAST_GRP_ID => group_id = Some(read_u32(payload)?),
                            _ => {}
                        }
                    }
                    if let (Some(group_name), Some(group_id)) = (group_name, group_id) {
                        mcast_groups.insert(group_name, group_id);
                    }
                }
            }
            _ => {}
        }
    }

    let id = id.ok_or_else(|| PacketIoError::Malformed("reply carries no family id".into()))?;
    Ok(FamilyInfo {
        id,
        name: family_name,
        mcast_groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tlv(kind: u16, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut header = [0u8; 4];
        NativeEndian::write_u16(&mut header[0..2], (4 + payload.len()) as u16);
        NativeEndian::write_u16(&mut header[2..4], kind);
        out.extend_from_slice(&header);
        out.extend_from_slice(payload);
        out.resize(align(out.len()), 0);
        out
    }

    fn message(message_type: u16, seq: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; NLMSG_HDRLEN];
        NativeEndian::write_u32(&mut out[0..4], (NLMSG_HDRLEN + payload.len()) as u32);
        NativeEndian::write_u16(&mut out[4..6], message_type);
        NativeEndian::write_u32(&mut out[8..12], seq);
        out.extend_from_slice(payload);
        out
    }

    fn family_reply(seq: u32) -> Vec<u8> {
        let mut group = tlv(CTRL_ATTR_MCAST_GRP_NAME, b"packets\0");
        group.extend(tlv(CTRL_ATTR_MCAST_GRP_ID, &9u32.to_ne_bytes()));

        let mut payload = vec![1, 2, 0, 0];
        payload.extend(tlv(CTRL_ATTR_FAMILY_ID, &0x1au16.to_ne_bytes()));
        payload.extend(tlv(CTRL_ATTR_FAMILY_NAME, b"genl_packet\0"));
        payload.extend(tlv(CTRL_ATTR_MCAST_GROUPS | 0x8000, &tlv(1, &group)));
        message(GENL_ID_CTRL, seq, &payload)
    }

    #[test]
    fn test_get_family_request_layout() {
        let msg = get_family_request("genl_packet", 7).unwrap();

        assert_eq!(msg.len(), 36);
        assert_eq!(NativeEndian::read_u32(&msg[0..4]), 36);
        assert_eq!(NativeEndian::read_u16(&msg[4..6]), GENL_ID_CTRL);
        assert_eq!(NativeEndian::read_u16(&msg[6..8]), NLM_F_REQUEST);
        assert_eq!(NativeEndian::read_u32(&msg[8..12]), 7);
        assert_eq!(msg[16], CTRL_CMD_GETFAMILY);
        assert_eq!(NativeEndian::read_u16(&msg[20..22]), 16);
        assert_eq!(NativeEndian::read_u16(&msg[22..24]), CTRL_ATTR_FAMILY_NAME);
        assert_eq!(&msg[24..36], b"genl_packet\0");
    }

    #[test]
    fn test_packet_attributes_are_padded() {
        let packet = GenlPacket {
            ingress_ifindex: 3,
            egress_ifindex: 4,
            context: 0xfeed,
            data: vec![0xaa; 5],
        };
        let msg = packet_message(0x1a, 1, &packet).unwrap();

        let attrs: Vec<_> = AttrIter::new(&msg[NLMSG_HDRLEN + GENL_HDRLEN..])
            .map(|attr| attr.unwrap())
            .map(|(kind, payload)| (kind, payload.to_vec()))
            .collect();
        assert_eq!(
            attrs,
            vec![
                (packet_attr::INGRESS_IFINDEX, 3u32.to_ne_bytes().to_vec()),
                (packet_attr::EGRESS_IFINDEX, 4u32.to_ne_bytes().to_vec()),
                (packet_attr::CONTEXT, 0xfeedu32.to_ne_bytes().to_vec()),
                (packet_attr::DATA, vec![0xaa; 5]),
            ]
        );
        assert_eq!(msg.len(), 20 + 3 * 8 + 12);
        assert_eq!(NativeEndian::read_u16(&msg[4..6]), 0x1a);
        assert_eq!(msg[16], PACKET_CMD);
    }

    #[test]
    fn test_oversized_packet_is_rejected() {
        let packet = GenlPacket {
            ingress_ifindex: 0,
            egress_ifindex: 0,
            context: 0,
            data: vec![0; 70_000],
        };
        assert!(matches!(
            packet_message(0x1a, 1, &packet),
            Err(PacketIoError::PacketTooLarge(70_000))
        ));
    }

    #[test]
    fn test_parse_family_reply() {
        let info = parse_family_reply(&family_reply(5), 5, "genl_packet").unwrap();

        assert_eq!(info.id, 0x1a);
        assert_eq!(info.name, "genl_packet");
        assert_eq!(info.group("packets").unwrap(), 9);
        assert!(matches!(
            info.group("missing"),
            Err(PacketIoError::GroupNotFound { .. })
        ));
    }

    #[test]
    fn test_reply_for_another_sequence_is_skipped() {
        assert!(matches!(
            parse_family_reply(&family_reply(4), 5, "genl_packet"),
            Err(PacketIoError::FamilyNotFound(_))
        ));
    }

    #[test]
    fn test_enoent_means_unknown_family() {
        let mut payload = (-libc::ENOENT).to_ne_bytes().to_vec();
        payload.extend_from_slice(&[0u8; 16]);
        let reply = message(NLMSG_ERROR, 5, &payload);

        assert!(matches!(
            parse_family_reply(&reply, 5, "nope"),
            Err(PacketIoError::FamilyNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_truncated_attribute_is_malformed() {
        let mut payload = vec![1, 2, 0, 0];
        payload.extend_from_slice(&[40, 0, 1, 0, 0x1a, 0]);
        let reply = message(GENL_ID_CTRL, 5, &payload);

        assert!(matches!(
            parse_family_reply(&reply, 5, "genl_packet"),
            Err(PacketIoError::Malformed(_))
        ));
    }

    #[test]
    fn test_group_mask() {
        assert_eq!(group_mask(1).unwrap(), 1);
        assert_eq!(group_mask(9).unwrap(), 0x100);
        assert!(matches!(group_mask(0), Err(PacketIoError::GroupOutOfRange(0))));
        assert!(matches!(group_mask(33), Err(PacketIoError::GroupOutOfRange(33))));
    }
}
