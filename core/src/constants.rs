// Protocol Constants
// ==================
//
// Literal values shared by every network the parameter sets describe.
// These are consensus-critical: a transcription error here is a silent
// chain split.

/// Serialized size of a block header in bytes.
///
/// Version (4) + previous hash (32) + merkle root (32) + time (4) +
/// compact difficulty bits (4) + nonce (4).
pub const HEADER_SIZE: usize = 80;

/// Compact encoding of the highest allowed proof-of-work target.
///
/// This is the difficulty floor set by the genesis block. Decoded it is
/// `00000000ffff0000...0000`, the easiest target any block may claim.
pub const MAX_BITS: u32 = 0x1d00ffff;

/// Number of blocks a coinbase output must wait before it can be spent.
pub const COINBASE_MATURITY: u32 = 100;

/// Number of blocks between block-subsidy halvings, roughly four years.
pub const SUBSIDY_HALVING_INTERVAL: u32 = 210_000;

/// Ideal duration of one difficulty-adjustment period: two weeks.
pub const TARGET_TIMESPAN_SECS: u32 = 14 * 24 * 60 * 60;

/// Ideal spacing between blocks: ten minutes.
pub const TARGET_SPACING_SECS: u32 = 10 * 60;

/// Number of blocks between difficulty retargets (2016).
pub const RETARGET_INTERVAL: u32 = TARGET_TIMESPAN_SECS / TARGET_SPACING_SECS;
