use crate::foundation::util::encoding::{decode_base32, encode_base32, sha512_256};
use crate::foundation::{ClaimError, ADDRESS_CHECKSUM_SIZE, ADDRESS_TEXT_LENGTH, PUBLIC_KEY_SIZE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

pub type Hash32 = [u8; 32];

/// Confirmation round number.
pub type Round = u64;

macro_rules! define_id_type {
    (string $name:ident) => {
        #[derive(Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };

    (numeric $name:ident) => {
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

define_id_type!(string NetworkId);
define_id_type!(string TxId);
define_id_type!(numeric AppId);
define_id_type!(numeric AssetId);

/// Account address: a 32-byte ed25519 public key.
///
/// Text form is base32 (no padding) of the key followed by the last four
/// bytes of its SHA-512/256 digest.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Address([u8; PUBLIC_KEY_SIZE]);

impl Address {
    pub const fn new(public_key: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn checksum(&self) -> [u8; ADDRESS_CHECKSUM_SIZE] {
        let digest = sha512_256(&[&self.0]);
        let mut checksum = [0u8; ADDRESS_CHECKSUM_SIZE];
        checksum.copy_from_slice(&digest[digest.len() - ADDRESS_CHECKSUM_SIZE..]);
        checksum
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClaimError> {
        let key: [u8; PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|_| ClaimError::invalid_address())?;
        Ok(Self(key))
    }
}

impl FromStr for Address {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_TEXT_LENGTH {
            return Err(ClaimError::invalid_address());
        }
        let decoded = decode_base32(s).map_err(|_| ClaimError::invalid_address())?;
        if decoded.len() != PUBLIC_KEY_SIZE + ADDRESS_CHECKSUM_SIZE {
            return Err(ClaimError::invalid_address());
        }
        let (key, checksum) = decoded.split_at(PUBLIC_KEY_SIZE);
        let address = Self::from_slice(key)?;
        if address.checksum() != checksum {
            return Err(ClaimError::invalid_address());
        }
        Ok(address)
    }
}

impl TryFrom<&str> for Address {
    type Error = ClaimError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = Vec::with_capacity(PUBLIC_KEY_SIZE + ADDRESS_CHECKSUM_SIZE);
        raw.extend_from_slice(&self.0);
        raw.extend_from_slice(&self.checksum());
        f.write_str(&encode_base32(&raw))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
