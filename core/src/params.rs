// Network Parameters
// ==================
//
// Per-network consensus parameters: identity bytes for the wire protocol
// and address encodings, the genesis block descriptor, the checkpoint
// table and the majority activation thresholds. Everything here is literal
// data assembled once per network; the parameter set itself contains no
// validation logic beyond the construction-time genesis assertion.

use std::net::Ipv4Addr;

use borsh::{BorshDeserialize, BorshSerialize};
use crypto_bigint::U256;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::checkpoints::CheckpointTable;
use crate::compact::decode_compact;
use crate::constants::{
    COINBASE_MATURITY, HEADER_SIZE, MAX_BITS, RETARGET_INTERVAL, SUBSIDY_HALVING_INTERVAL,
    TARGET_SPACING_SECS, TARGET_TIMESPAN_SECS,
};
use crate::hashes::{calculate_double_sha256, BlockHash};
use crate::majority::MajorityThresholds;

/// Fatal configuration errors raised while assembling a parameter set.
///
/// Any of these means the compiled-in literals are corrupted; the process
/// must not proceed with the affected network.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ParamsError {
    #[error("genesis hash mismatch: expected {expected}, computed {got}")]
    GenesisHashMismatch { expected: BlockHash, got: BlockHash },

    #[error("checkpoint heights must be strictly increasing, violated at height {height}")]
    UnsortedCheckpoints { height: u32 },

    #[error("majority thresholds {enforce_upgrade}/{reject_outdated} invalid for window {window}")]
    InvalidThresholds {
        window: u32,
        enforce_upgrade: u32,
        reject_outdated: u32,
    },

    #[error("malformed digest literal {literal:?}")]
    MalformedDigest { literal: String },
}

/// The networks this crate ships parameters for.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// The parameter set for this network.
    ///
    /// Lazily built on first access, from any thread; every caller observes
    /// the same fully constructed instance and the genesis assertion runs
    /// exactly once per network. A corrupted parameter set aborts here.
    pub fn params(self) -> &'static NetworkParams {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "main",
            Network::Testnet => "test",
        }
    }
}

/// Literal fields of a network's first block header, plus the digest the
/// assembled header must hash to.
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct GenesisParams {
    pub version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
    pub merkle_root: BlockHash,
    pub expected_hash: BlockHash,
}

impl GenesisParams {
    /// The serialized 80-byte header: little-endian fields, all-zero
    /// previous hash.
    pub fn header_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        // Bytes 4..36 stay zero: the genesis block has no parent.
        out[36..68].copy_from_slice(&self.merkle_root.to_byte_array());
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    /// Double-SHA256 of the serialized header.
    pub fn hash(&self) -> BlockHash {
        BlockHash::from_bytes(calculate_double_sha256(&self.header_bytes()))
    }
}

/// Immutable parameter bundle for one network.
#[derive(Clone, Debug)]
pub struct NetworkParams {
    pub network: Network,
    /// Message-start bytes framing every wire-protocol message.
    pub packet_magic: u32,
    pub default_port: u16,
    /// Base58 version byte for pay-to-pubkey-hash addresses.
    pub address_header: u8,
    /// Base58 version byte for pay-to-script-hash addresses.
    pub p2sh_header: u8,
    /// Base58 version byte for dumped private keys (WIF).
    pub wif_header: u8,
    /// BIP32 extended public key prefix ("xpub" on mainnet).
    pub bip32_header_pub: u32,
    /// BIP32 extended private key prefix ("xprv" on mainnet).
    pub bip32_header_priv: u32,
    /// Human-readable part of segwit bech32 addresses.
    pub bech32_hrp: &'static str,
    pub dns_seeds: &'static [&'static str],
    /// Hard-coded fallback peers, tried when DNS seed discovery fails.
    pub addr_seeds: &'static [Ipv4Addr],
    /// Compact encoding of the easiest allowed proof-of-work target.
    pub max_bits: u32,
    /// Decoded form of `max_bits`; every valid block target is at most this.
    pub max_target: U256,
    pub genesis: GenesisParams,
    pub checkpoints: CheckpointTable,
    pub majority: MajorityThresholds,
    pub subsidy_halving_interval: u32,
    pub coinbase_maturity: u32,
    pub retarget_interval: u32,
    pub target_timespan_secs: u32,
    pub target_spacing_secs: u32,
    /// Testnet rule: a block may fall back to the minimum difficulty when
    /// no block was found for twice the target spacing.
    pub allow_min_difficulty_blocks: bool,
}

lazy_static! {
    static ref MAINNET: NetworkParams = NetworkParams::build(Network::Mainnet)
        .unwrap_or_else(|e| panic!("mainnet parameters are corrupted: {e}"));
    static ref TESTNET: NetworkParams = NetworkParams::build(Network::Testnet)
        .unwrap_or_else(|e| panic!("testnet parameters are corrupted: {e}"));
}

const MAINNET_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"),
    (11111, "0000000069e244f73d78e8fd29ba2fd2ed618bd6fa2ee92559f542fdb26e7c1d"),
    (33333, "000000002dd5588a74784eaa7ab0507a18ad16a236e7b1ce69f00d7ddfb5d0a6"),
    (74000, "0000000000573993a3c9e41ce34471c079dcf5f52a0e824a81e7f953b8661a20"),
    (105000, "00000000000291ce28027faea320c8d2b054b2e0fe44a773f3eefb151d6bdc97"),
    (134444, "00000000000005b12ffd4cd315cd34ffd4a594f430ac814c91539a9552ccb05b"),
    (168000, "000000000000099e61ea72015e79632f216fe2cb33d7899acb35b75c8303b763"),
    (193000, "000000000000059f452a5f7340de6682a977387c17010ff6e6c3bd83ca8b1317"),
    (210000, "000000000000048b95347e83192f69cf0366076336c639f9b7228e9ba171342e"),
    (216116, "00000000000001b4f4b433e81ee46494af945cf96014816a4e2370f11b23df4e"),
    (225430, "00000000000001c108384350f74090433e7fcf79a606b8e797f065b130575932"),
    (250000, "000000000000003887df1f29024b06fc2200b55f8af8f35453d7be294df2d214"),
    (279000, "0000000000000001ae8c72a0b0c301f67e3afca10e819efa9041e458e9bd7e40"),
    (295000, "00000000000000004d9b4ef50f0f9d686fd69db2e03af35a100370c64632a983"),
];

const TESTNET_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943"),
    (546, "000000002a936ca763904c3c35fce2f3556c559c0214345d31b1bcebf76acb70"),
];

const MAINNET_ADDR_SEEDS: &[Ipv4Addr] = &[
    Ipv4Addr::new(113, 146, 115, 99),
    Ipv4Addr::new(133, 18, 173, 147),
    Ipv4Addr::new(203, 152, 216, 75),
    Ipv4Addr::new(203, 152, 216, 76),
    Ipv4Addr::new(203, 152, 216, 77),
    Ipv4Addr::new(213, 32, 89, 205),
    Ipv4Addr::new(222, 170, 66, 9),
    Ipv4Addr::new(35, 231, 30, 152),
];

/// Merkle root of the genesis coinbase transaction, shared by both networks.
const GENESIS_MERKLE_ROOT: &str =
    "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

impl NetworkParams {
    /// Assemble and validate the parameter set for `network`.
    ///
    /// Computes the genesis header hash and compares it against the
    /// hard-coded digest; a mismatch is fatal and must abort initialization.
    pub fn build(network: Network) -> Result<Self, ParamsError> {
        let params = match network {
            Network::Mainnet => Self::mainnet()?,
            Network::Testnet => Self::testnet()?,
        };
        params.validate()?;
        info!(
            network = params.network.name(),
            genesis = %params.genesis.expected_hash,
            checkpoints = params.checkpoints.len(),
            "network parameters ready"
        );
        Ok(params)
    }

    fn mainnet() -> Result<Self, ParamsError> {
        Ok(NetworkParams {
            network: Network::Mainnet,
            packet_magic: 0xf9beb4d9,
            default_port: 8333,
            address_header: 0,
            p2sh_header: 5,
            wif_header: 128,
            // The 4-byte headers that serialize in base58 to "xpub"/"xprv".
            bip32_header_pub: 0x0488b21e,
            bip32_header_priv: 0x0488ade4,
            bech32_hrp: "bc",
            dns_seeds: &[
                "seed.bitcoin.sipa.be",
                "dnsseed.bluematt.me",
                "seed.bitcoinstats.com",
                "seed.bitcoin.jonasschnelli.ch",
                "seed.btc.petertodd.org",
                "seed.bitcoin.sprovoost.nl",
            ],
            addr_seeds: MAINNET_ADDR_SEEDS,
            max_bits: MAX_BITS,
            max_target: decode_compact(MAX_BITS),
            genesis: GenesisParams {
                version: 1,
                time: 1231006505,
                bits: 0x1d00ffff,
                nonce: 2083236893,
                merkle_root: digest(GENESIS_MERKLE_ROOT)?,
                expected_hash: digest(
                    "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f",
                )?,
            },
            checkpoints: checkpoint_table(MAINNET_CHECKPOINTS)?,
            majority: MajorityThresholds {
                window: 1000,
                enforce_upgrade: 750,
                reject_outdated: 950,
            },
            subsidy_halving_interval: SUBSIDY_HALVING_INTERVAL,
            coinbase_maturity: COINBASE_MATURITY,
            retarget_interval: RETARGET_INTERVAL,
            target_timespan_secs: TARGET_TIMESPAN_SECS,
            target_spacing_secs: TARGET_SPACING_SECS,
            allow_min_difficulty_blocks: false,
        })
    }

    fn testnet() -> Result<Self, ParamsError> {
        Ok(NetworkParams {
            network: Network::Testnet,
            packet_magic: 0x0b110907,
            default_port: 18333,
            address_header: 111,
            p2sh_header: 196,
            wif_header: 239,
            // Serialize in base58 to "tpub"/"tprv".
            bip32_header_pub: 0x043587cf,
            bip32_header_priv: 0x04358394,
            bech32_hrp: "tb",
            dns_seeds: &[
                "testnet-seed.bitcoin.jonasschnelli.ch",
                "seed.tbtc.petertodd.org",
                "testnet-seed.bluematt.me",
            ],
            // No fixed fallback peers; testnet relies on DNS discovery.
            addr_seeds: &[],
            max_bits: MAX_BITS,
            max_target: decode_compact(MAX_BITS),
            genesis: GenesisParams {
                version: 1,
                time: 1296688602,
                bits: 0x1d00ffff,
                nonce: 414098458,
                merkle_root: digest(GENESIS_MERKLE_ROOT)?,
                expected_hash: digest(
                    "000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943",
                )?,
            },
            checkpoints: checkpoint_table(TESTNET_CHECKPOINTS)?,
            majority: MajorityThresholds {
                window: 100,
                enforce_upgrade: 51,
                reject_outdated: 75,
            },
            subsidy_halving_interval: SUBSIDY_HALVING_INTERVAL,
            coinbase_maturity: COINBASE_MATURITY,
            retarget_interval: RETARGET_INTERVAL,
            target_timespan_secs: TARGET_TIMESPAN_SECS,
            target_spacing_secs: TARGET_SPACING_SECS,
            allow_min_difficulty_blocks: true,
        })
    }

    fn validate(&self) -> Result<(), ParamsError> {
        let computed = self.genesis.hash();
        if computed != self.genesis.expected_hash {
            return Err(ParamsError::GenesisHashMismatch {
                expected: self.genesis.expected_hash,
                got: computed,
            });
        }
        let m = self.majority;
        if m.enforce_upgrade > m.window
            || m.reject_outdated > m.window
            || m.enforce_upgrade > m.reject_outdated
        {
            return Err(ParamsError::InvalidThresholds {
                window: m.window,
                enforce_upgrade: m.enforce_upgrade,
                reject_outdated: m.reject_outdated,
            });
        }
        debug!(network = self.network.name(), "genesis digest verified");
        Ok(())
    }

    /// True when the block following `height` starts a new difficulty
    /// retarget period.
    pub fn is_difficulty_transition_point(&self, height: u32) -> bool {
        (height + 1) % self.retarget_interval == 0
    }
}

fn digest(literal: &'static str) -> Result<BlockHash, ParamsError> {
    BlockHash::from_display_hex(literal).map_err(|_| ParamsError::MalformedDigest {
        literal: literal.to_owned(),
    })
}

fn checkpoint_table(entries: &[(u32, &'static str)]) -> Result<CheckpointTable, ParamsError> {
    let mut parsed = Vec::with_capacity(entries.len());
    for &(height, literal) in entries {
        parsed.push((height, digest(literal)?));
    }
    CheckpointTable::from_entries(parsed)
}
