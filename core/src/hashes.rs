// Block hash implementations

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub fn calculate_double_sha256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::default();
    hasher.update(input);
    let result = hasher.finalize_reset();
    hasher.update(result);
    hasher.finalize().into()
}

pub fn calculate_sha256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::default();
    hasher.update(input);
    hasher.finalize().into()
}

/// A block header digest in internal (header) byte order.
///
/// Explorers, RPC output and the checkpoint literals in this crate all use
/// the reversed display order; `Display` and [`BlockHash::from_display_hex`]
/// convert between the two.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        BlockHash(bytes)
    }

    /// Parse a digest from the conventional reversed hex notation.
    pub fn from_display_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        bytes.reverse();
        Ok(BlockHash(bytes))
    }

    pub fn to_byte_array(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = self.0;
        bytes.reverse();
        write!(f, "{}", hex::encode(bytes))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_double_sha256() {
        assert_eq!(
            calculate_double_sha256(b""),
            hex!("5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456")
        );
    }

    #[test]
    fn test_single_sha256() {
        assert_eq!(
            calculate_sha256(b"abc"),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_display_hex_round_trip() {
        let s = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
        let hash = BlockHash::from_display_hex(s).unwrap();
        assert_eq!(hash.to_string(), s);
        // Internal order is the reverse of display order.
        assert_eq!(hash.to_byte_array()[31], 0x00);
        assert_eq!(hash.to_byte_array()[0], 0x6f);
    }

    #[test]
    fn test_from_display_hex_rejects_bad_input() {
        assert!(BlockHash::from_display_hex("abcd").is_err());
        assert!(BlockHash::from_display_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_borsh_round_trip() {
        let hash = BlockHash::from_bytes([0xab; 32]);
        let encoded = borsh::to_vec(&hash).unwrap();
        let decoded: BlockHash = borsh::from_slice(&encoded).unwrap();
        assert_eq!(hash, decoded);
    }
}
