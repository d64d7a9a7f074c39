//! `sai_mac_t`

use crate::ParseError;
use std::fmt;
use std::str::FromStr;

/// Six octets in wire order.
///
/// ```
/// use sai_types::MacAddress;
///
/// let mac: MacAddress = "02:42:ac:11:00:02".parse().unwrap();
/// assert_eq!(mac.as_bytes()[5], 2);
/// assert!(MacAddress::from_slice(&[0x02, 0x42]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const ZERO: MacAddress = MacAddress([0; 6]);

    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    /// Takes exactly six bytes from a decoded field. Other lengths are an
    /// error, never padded or cut.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        <[u8; 6]>::try_from(bytes)
            .map(MacAddress)
            .map_err(|_| ParseError::InvalidMacLength(bytes.len()))
    }

    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, octet) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

/// Colon-separated hex, two digits per octet.
impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidMacAddress(s.to_string());
        let mut bytes = [0u8; 6];
        let mut parts = s.split(':');
        for byte in bytes.iter_mut() {
            let part = parts.next().filter(|p| p.len() == 2).ok_or_else(invalid)?;
            *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(MacAddress(bytes))
    }
}
