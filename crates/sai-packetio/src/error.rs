//! Errors of the packet channel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PacketIoError {
    #[error("netlink socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("generic netlink family {0:?} not found")]
    FamilyNotFound(String),

    #[error("family {family:?} has no multicast group {group:?}")]
    GroupNotFound { family: String, group: String },

    #[error("multicast group id {0} cannot be addressed by a group mask")]
    GroupOutOfRange(u32),

    #[error("kernel returned errno {0}")]
    Kernel(i32),

    #[error("malformed netlink message: {0}")]
    Malformed(String),

    #[error("packet of {0} bytes does not fit in one netlink attribute")]
    PacketTooLarge(usize),

    #[error("unknown packet handle {0}")]
    UnknownHandle(u64),

    #[error("invalid packet channel config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("packet handle registry poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, PacketIoError>;
