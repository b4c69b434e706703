// Compact Difficulty Bits
// =======================
//
// Block headers carry the 256-bit proof-of-work target packed into a 32-bit
// field: the top byte is a base-256 exponent (the byte length of the
// number) and the low 24 bits are a signed mantissa. The format descends
// from OpenSSL's bignum serialization and every quirk of it is
// consensus-critical, including the sign bit that no valid header ever
// sets.

use crypto_bigint::{Encoding, U256};

/// The low 23 bits of a compact value hold the mantissa magnitude.
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Bit 23 of the mantissa is a sign bit.
const SIGN_BIT: u32 = 0x0080_0000;

/// Expand a compact 32-bit difficulty encoding into a 256-bit target.
///
/// Total over all 32-bit inputs: a set sign bit decodes to a zero target
/// (the historical bignum behavior, which downstream validation relies on),
/// and mantissa bytes shifted beyond the 256-bit width are discarded, the
/// same numeric result a 256-bit left shift would produce.
pub fn decode_compact(bits: u32) -> U256 {
    let exponent = (bits >> 24) as usize;
    let mantissa = bits & MANTISSA_MASK;

    // Negative compact values decode to zero rather than an error.
    if bits & SIGN_BIT != 0 {
        return U256::ZERO;
    }

    if exponent <= 3 {
        return U256::from_u32(mantissa >> (8 * (3 - exponent)));
    }

    // Place the three mantissa bytes at their big-endian offsets. The least
    // significant byte lands at position 8*(exponent-3) from the low end.
    let mut out = [0u8; 32];
    let low = 31_isize - (exponent as isize - 3);
    let mantissa_bytes = [mantissa as u8, (mantissa >> 8) as u8, (mantissa >> 16) as u8];
    for (i, byte) in mantissa_bytes.into_iter().enumerate() {
        let idx = low - i as isize;
        if (0..32).contains(&idx) {
            out[idx as usize] = byte;
        }
    }
    U256::from_be_bytes(out)
}

/// Pack a 256-bit target into the compact 32-bit header encoding.
///
/// Uses the minimal byte length for the magnitude. When the mantissa's high
/// bit would read back as a sign, the mantissa is shifted down a byte and
/// the exponent bumped, so the result always round-trips through
/// [`decode_compact`]. Precision beyond the top three bytes is dropped.
pub fn encode_compact(target: &U256) -> u32 {
    let bytes = target.to_be_bytes();
    let mut size = 32 - bytes.iter().take_while(|b| **b == 0).count();
    if size == 0 {
        return 0;
    }

    let mut compact = if size <= 3 {
        let low = u32::from_be_bytes([0, bytes[29], bytes[30], bytes[31]]);
        low << (8 * (3 - size))
    } else {
        let first = 32 - size;
        u32::from_be_bytes([0, bytes[first], bytes[first + 1], bytes[first + 2]])
    };

    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | ((size as u32) << 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_TARGET_HEX: &str =
        "00000000FFFF0000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_decode_max_target() {
        assert_eq!(decode_compact(0x1d00ffff), U256::from_be_hex(MAX_TARGET_HEX));
    }

    #[test]
    fn test_decode_reference_vectors() {
        assert_eq!(decode_compact(0x00000000), U256::ZERO);
        assert_eq!(decode_compact(0x01123456), U256::from_u32(0x12));
        assert_eq!(decode_compact(0x02123456), U256::from_u32(0x1234));
        assert_eq!(decode_compact(0x03123456), U256::from_u32(0x123456));
        assert_eq!(decode_compact(0x04123456), U256::from_u32(0x12345600));
        assert_eq!(decode_compact(0x05009234), U256::from_u64(0x92340000));
        assert_eq!(
            decode_compact(0x20123456),
            U256::from_be_hex(
                "1234560000000000000000000000000000000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn test_decode_negative_is_zero() {
        // Sign bit set: the historical bignum code produced a negative
        // number, which compares as a zero target. Preserved exactly.
        assert_eq!(decode_compact(0x01fedcba), U256::ZERO);
        assert_eq!(decode_compact(0x04923456), U256::ZERO);
        assert_eq!(decode_compact(0x00800000), U256::ZERO);
    }

    #[test]
    fn test_decode_overflow_discards_high_bytes() {
        // Exponent 0x22 pushes the top two mantissa bytes past bit 255;
        // only the low byte survives at the top of the 256-bit range.
        assert_eq!(
            decode_compact(0x22123456),
            U256::from_be_hex(
                "5600000000000000000000000000000000000000000000000000000000000000"
            )
        );
        // Everything shifted out: the result saturates to zero.
        assert_eq!(decode_compact(0xff123456), U256::ZERO);
    }

    #[test]
    fn test_decode_is_total() {
        // Never panics, for any exponent and a busy mantissa.
        for exponent in 0..=0xffu32 {
            let _ = decode_compact((exponent << 24) | 0x00123456);
            let _ = decode_compact((exponent << 24) | 0x007fffff);
            let _ = decode_compact((exponent << 24) | 0x00ffffff);
        }
    }

    #[test]
    fn test_encode_reference_vectors() {
        assert_eq!(encode_compact(&U256::ZERO), 0);
        assert_eq!(encode_compact(&U256::from_u32(0x12)), 0x01120000);
        assert_eq!(encode_compact(&U256::from_u32(0x1234)), 0x02123400);
        assert_eq!(encode_compact(&U256::from_u32(0x123456)), 0x03123456);
        assert_eq!(encode_compact(&U256::from_u64(0x92340000)), 0x05009234);
    }

    #[test]
    fn test_encode_avoids_sign_bit() {
        // 0x80 packed naively would be 0x01800000, which reads back as
        // negative; the exponent is bumped instead.
        assert_eq!(encode_compact(&U256::from_u32(0x80)), 0x02008000);
        assert_eq!(decode_compact(0x02008000), U256::from_u32(0x80));
    }

    #[test]
    fn test_round_trip_canonical_values() {
        for bits in [0x1d00ffffu32, 0x1b0404cb, 0x20123456, 0x03123456, 0x181bc330] {
            assert_eq!(encode_compact(&decode_compact(bits)), bits, "bits {bits:#010x}");
        }
    }

    #[test]
    fn test_round_trip_loses_low_precision() {
        // Only the top three bytes of the magnitude survive the packing.
        let target = U256::from_u64(0x1234_5678);
        assert_eq!(decode_compact(encode_compact(&target)), U256::from_u64(0x1234_5600));
    }
}
