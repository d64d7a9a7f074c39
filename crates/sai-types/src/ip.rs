//! IP address and prefix values with family-preserving byte conversions.

use crate::ParseError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// An IP address tagged by family (`sai_ip_address_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpAddress {
    V4(Ipv4Addr),
    V6(Ipv6Addr),
}

impl IpAddress {
    /// Returns the address in network byte order: 4 bytes for IPv4, 16 for IPv6.
    pub fn octets(&self) -> Vec<u8> {
        match self {
            IpAddress::V4(addr) => addr.octets().to_vec(),
            IpAddress::V6(addr) => addr.octets().to_vec(),
        }
    }

    /// Rebuilds an address from network-order bytes.
    ///
    /// The family is selected by length; any length other than 4 or 16 is
    /// rejected rather than guessed.
    pub fn from_octets(bytes: &[u8]) -> Result<Self, ParseError> {
        match bytes.len() {
            4 => {
                let octets: [u8; 4] = bytes
                    .try_into()
                    .map_err(|_| ParseError::InvalidIpLength(bytes.len()))?;
                Ok(IpAddress::V4(Ipv4Addr::from(octets)))
            }
            16 => {
                let octets: [u8; 16] = bytes
                    .try_into()
                    .map_err(|_| ParseError::InvalidIpLength(bytes.len()))?;
                Ok(IpAddress::V6(Ipv6Addr::from(octets)))
            }
            n => Err(ParseError::InvalidIpLength(n)),
        }
    }

    pub const fn same_family(&self, other: &IpAddress) -> bool {
        matches!(
            (self, other),
            (IpAddress::V4(_), IpAddress::V4(_)) | (IpAddress::V6(_), IpAddress::V6(_))
        )
    }

    fn max_prefix_len(&self) -> u8 {
        match self {
            IpAddress::V4(_) => 32,
            IpAddress::V6(_) => 128,
        }
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddress::V4(addr) => addr.fmt(f),
            IpAddress::V6(addr) => addr.fmt(f),
        }
    }
}

impl FromStr for IpAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<IpAddr>()
            .map(IpAddress::from)
            .map_err(|_| ParseError::InvalidIpAddress(s.to_string()))
    }
}

impl From<IpAddr> for IpAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => IpAddress::V4(v4),
            IpAddr::V6(v6) => IpAddress::V6(v6),
        }
    }
}

/// An IP prefix as an address plus a mask of the same family
/// (`sai_ip_prefix_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpPrefix {
    address: IpAddress,
    mask: IpAddress,
}

impl IpPrefix {
    /// Creates a prefix from an address and a prefix length.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix length exceeds 32 (IPv4) or 128 (IPv6).
    pub fn new(address: IpAddress, prefix_len: u8) -> Result<Self, ParseError> {
        let max_len = address.max_prefix_len();
        if prefix_len > max_len {
            return Err(ParseError::InvalidIpPrefix(format!(
                "prefix length {} exceeds maximum {} for address type",
                prefix_len, max_len
            )));
        }

        let mask = match address {
            IpAddress::V4(_) => {
                let bits = u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0);
                IpAddress::V4(Ipv4Addr::from(bits))
            }
            IpAddress::V6(_) => {
                let bits = u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0);
                IpAddress::V6(Ipv6Addr::from(bits))
            }
        };

        Ok(IpPrefix { address, mask })
    }

    /// Creates a prefix from an address and an explicit mask.
    ///
    /// # Errors
    ///
    /// Mixed-family pairs (an IPv4 address with an IPv6 mask or vice versa)
    /// are rejected.
    pub fn from_mask(address: IpAddress, mask: IpAddress) -> Result<Self, ParseError> {
        if !address.same_family(&mask) {
            return Err(ParseError::InvalidIpPrefix(format!(
                "address {} and mask {} belong to different families",
                address, mask
            )));
        }
        Ok(IpPrefix { address, mask })
    }

    /// Returns the network address of this prefix.
    pub const fn address(&self) -> &IpAddress {
        &self.address
    }

    /// Returns the mask of this prefix.
    pub const fn mask(&self) -> &IpAddress {
        &self.mask
    }

    /// Returns the number of leading one bits in the mask.
    pub fn prefix_len(&self) -> u8 {
        let ones = match self.mask {
            IpAddress::V4(mask) => u32::from(mask).leading_ones(),
            IpAddress::V6(mask) => u128::from(mask).leading_ones(),
        };
        // leading_ones() is bounded by the address width (<= 128)
        ones as u8
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len())
    }
}

impl FromStr for IpPrefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidIpPrefix(s.to_string());
        let (address, len) = s.rsplit_once('/').ok_or_else(invalid)?;
        IpPrefix::new(address.parse()?, len.parse().map_err(|_| invalid())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_octets_preserve_family() {
        let v4: IpAddress = "10.0.0.1".parse().unwrap();
        assert_eq!(v4.octets(), vec![10, 0, 0, 1]);
        assert_eq!(IpAddress::from_octets(&v4.octets()).unwrap(), v4);

        let v6: IpAddress = "2001:db8::1".parse().unwrap();
        assert_eq!(v6.octets().len(), 16);
        assert_eq!(IpAddress::from_octets(&v6.octets()).unwrap(), v6);
    }

    #[test]
    fn test_from_octets_rejects_odd_lengths() {
        assert_eq!(IpAddress::from_octets(&[]), Err(ParseError::InvalidIpLength(0)));
        assert_eq!(
            IpAddress::from_octets(&[1, 2, 3, 4, 5]),
            Err(ParseError::InvalidIpLength(5))
        );
    }

    #[test]
    fn test_prefix_mask() {
        let prefix: IpPrefix = "10.1.0.0/16".parse().unwrap();
        assert_eq!(prefix.mask().to_string(), "255.255.0.0");
        assert_eq!(prefix.prefix_len(), 16);
        assert_eq!(prefix.to_string(), "10.1.0.0/16");

        let default_v6: IpPrefix = "::/0".parse().unwrap();
        assert_eq!(default_v6.mask().to_string(), "::");
        assert_eq!(default_v6.prefix_len(), 0);

        let host: IpPrefix = "2001:db8::1/128".parse().unwrap();
        assert_eq!(host.prefix_len(), 128);
    }

    #[test]
    fn test_from_mask_rejects_mixed_family() {
        let v4: IpAddress = "10.0.0.0".parse().unwrap();
        let v6_mask: IpAddress = "ffff::".parse().unwrap();
        assert!(IpPrefix::from_mask(v4, v6_mask).is_err());

        let v4_mask: IpAddress = "255.0.0.0".parse().unwrap();
        let prefix = IpPrefix::from_mask(v4, v4_mask).unwrap();
        assert_eq!(prefix.prefix_len(), 8);
    }

    #[test]
    fn test_invalid_prefix_length() {
        assert!("10.0.0.0/33".parse::<IpPrefix>().is_err());
        assert!("2001:db8::/129".parse::<IpPrefix>().is_err());
    }
}
