//! ARC-4 method selectors and the argument encodings the contract uses.

use crate::foundation::util::encoding::sha512_256;
use crate::foundation::{Address, ClaimError, MAX_APP_ARGS, METHOD_SELECTOR_SIZE, PUBLIC_KEY_SIZE};
use std::fmt;
use std::str::FromStr;

const ARRAY_LENGTH_PREFIX: usize = 2;
const UINT64_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbiType {
    Address,
    Uint64,
    AddressArray,
    Uint64Array,
}

impl AbiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbiType::Address => "address",
            AbiType::Uint64 => "uint64",
            AbiType::AddressArray => "address[]",
            AbiType::Uint64Array => "uint64[]",
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbiType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "address" => Ok(AbiType::Address),
            "uint64" => Ok(AbiType::Uint64),
            "address[]" => Ok(AbiType::AddressArray),
            "uint64[]" => Ok(AbiType::Uint64Array),
            other => Err(ClaimError::EncodingError(format!("unsupported ABI type: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    Uint64(u64),
    AddressArray(Vec<Address>),
    Uint64Array(Vec<u64>),
}

impl AbiValue {
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::Uint64(_) => AbiType::Uint64,
            AbiValue::AddressArray(_) => AbiType::AddressArray,
            AbiValue::Uint64Array(_) => AbiType::Uint64Array,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, ClaimError> {
        match self {
            AbiValue::Address(address) => Ok(address.as_bytes().to_vec()),
            AbiValue::Uint64(value) => Ok(value.to_be_bytes().to_vec()),
            AbiValue::AddressArray(addresses) => {
                let mut out = array_header(addresses.len())?;
                for address in addresses {
                    out.extend_from_slice(address.as_bytes());
                }
                Ok(out)
            }
            AbiValue::Uint64Array(values) => {
                let mut out = array_header(values.len())?;
                for value in values {
                    out.extend_from_slice(&value.to_be_bytes());
                }
                Ok(out)
            }
        }
    }

    pub fn decode(ty: AbiType, bytes: &[u8]) -> Result<Self, ClaimError> {
        match ty {
            AbiType::Address => Ok(AbiValue::Address(Address::from_slice(bytes)?)),
            AbiType::Uint64 => Ok(AbiValue::Uint64(read_u64(bytes)?)),
            AbiType::AddressArray => {
                let items = split_array(bytes, PUBLIC_KEY_SIZE)?;
                Ok(AbiValue::AddressArray(items.map(Address::from_slice).collect::<Result<Vec<_>, _>>()?))
            }
            AbiType::Uint64Array => {
                let items = split_array(bytes, UINT64_SIZE)?;
                Ok(AbiValue::Uint64Array(items.map(read_u64).collect::<Result<Vec<_>, _>>()?))
            }
        }
    }
}

fn array_header(len: usize) -> Result<Vec<u8>, ClaimError> {
    let len = u16::try_from(len).map_err(|_| ClaimError::EncodingError(format!("ABI array too long: {len}")))?;
    Ok(len.to_be_bytes().to_vec())
}

fn read_u64(bytes: &[u8]) -> Result<u64, ClaimError> {
    let raw: [u8; UINT64_SIZE] =
        bytes.try_into().map_err(|_| ClaimError::EncodingError(format!("uint64 expects 8 bytes, got {}", bytes.len())))?;
    Ok(u64::from_be_bytes(raw))
}

fn split_array(bytes: &[u8], item_size: usize) -> Result<std::slice::ChunksExact<'_, u8>, ClaimError> {
    if bytes.len() < ARRAY_LENGTH_PREFIX {
        return Err(ClaimError::EncodingError("ABI array missing length prefix".to_string()));
    }
    let (header, body) = bytes.split_at(ARRAY_LENGTH_PREFIX);
    let len = u16::from_be_bytes([header[0], header[1]]) as usize;
    if body.len() != len * item_size {
        return Err(ClaimError::EncodingError(format!(
            "ABI array length {len} does not match payload of {} bytes",
            body.len()
        )));
    }
    Ok(body.chunks_exact(item_size))
}

/// A contract method as written in its signature, e.g. `claim()void`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbiMethod {
    pub name: String,
    pub args: Vec<AbiType>,
    pub returns: String,
}

impl AbiMethod {
    pub fn signature(&self) -> String {
        let args = self.args.iter().map(AbiType::as_str).collect::<Vec<_>>().join(",");
        format!("{}({}){}", self.name, args, self.returns)
    }

    pub fn selector(&self) -> [u8; METHOD_SELECTOR_SIZE] {
        let digest = sha512_256(&[self.signature().as_bytes()]);
        let mut selector = [0u8; METHOD_SELECTOR_SIZE];
        selector.copy_from_slice(&digest[..METHOD_SELECTOR_SIZE]);
        selector
    }

    /// Application arguments: selector followed by one entry per argument.
    pub fn encode_call(&self, args: &[AbiValue]) -> Result<Vec<Vec<u8>>, ClaimError> {
        if args.len() != self.args.len() {
            return Err(ClaimError::EncodingError(format!(
                "{} expects {} arguments, got {}",
                self.name,
                self.args.len(),
                args.len()
            )));
        }
        if args.len() + 1 > MAX_APP_ARGS {
            return Err(ClaimError::EncodingError(format!("{} has too many arguments", self.name)));
        }
        let mut app_args = Vec::with_capacity(args.len() + 1);
        app_args.push(self.selector().to_vec());
        for (expected, value) in self.args.iter().zip(args) {
            if value.abi_type() != *expected {
                return Err(ClaimError::EncodingError(format!(
                    "{} argument type mismatch: expected {expected}, got {}",
                    self.name,
                    value.abi_type()
                )));
            }
            app_args.push(value.encode()?);
        }
        Ok(app_args)
    }
}

impl fmt::Display for AbiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

impl FromStr for AbiMethod {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ClaimError::EncodingError(format!("malformed method signature: '{s}'"));
        let open = s.find('(').ok_or_else(invalid)?;
        let close = s.rfind(')').ok_or_else(invalid)?;
        if close < open {
            return Err(invalid());
        }
        let name = &s[..open];
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }
        let inner = &s[open + 1..close];
        let args = if inner.trim().is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(AbiType::from_str).collect::<Result<Vec<_>, _>>()?
        };
        let returns = s[close + 1..].trim();
        if returns.is_empty() {
            return Err(invalid());
        }
        Ok(Self { name: name.to_string(), args, returns: returns.to_string() })
    }
}
