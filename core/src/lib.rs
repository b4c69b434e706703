// Consensus Network-Parameter Primitives
// ======================================
//
// The load-bearing validation primitives a Bitcoin-protocol-compatible node
// must reproduce bit-exactly: the compact-bits difficulty codec, the
// checkpoint enforcement table, and the majority-vote block-version
// detector, plus the per-network parameter set that assembles them.
//
// Full chain validation (UTXO tracking, script execution), networking and
// wallet logic live in the consumers of this crate.

pub mod checkpoints;
pub mod compact;
pub mod constants;
pub mod hashes;
pub mod majority;
pub mod params;

pub use checkpoints::{CheckpointTable, CheckpointVerdict};
pub use compact::{decode_compact, encode_compact};
pub use hashes::BlockHash;
pub use majority::{count_at_least, MajorityThresholds};
pub use params::{GenesisParams, Network, NetworkParams, ParamsError};
