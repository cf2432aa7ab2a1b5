//! Sign + magnitude packing for the signed key channels.
//!
//! Zero is always encoded with the sign bit clear. A raw `-0` (sign set,
//! magnitude zero) still decodes to 0; [`canonical`] rewrites it to `+0` so two
//! keys for the same coordinate never coexist.

/// Packs `v` into `mag_bits` of magnitude plus one sign bit above them.
/// Magnitudes wider than the field are masked.
#[inline]
pub const fn encode(v: i32, mag_bits: u32) -> u32 {
    let mask = (1u32 << mag_bits) - 1;
    let mag = v.unsigned_abs() & mask;
    let sign = if v < 0 && mag != 0 { 1u32 } else { 0 };
    (sign << mag_bits) | mag
}

#[inline]
pub const fn decode(raw: u32, mag_bits: u32) -> i32 {
    let mask = (1u32 << mag_bits) - 1;
    let mag = (raw & mask) as i32;
    if (raw >> mag_bits) & 1 == 1 { -mag } else { mag }
}

/// Clears the sign bit of a zero magnitude.
#[inline]
pub const fn canonical(raw: u32, mag_bits: u32) -> u32 {
    let mask = (1u32 << mag_bits) - 1;
    if raw & mask == 0 { 0 } else { raw & ((mask << 1) | 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_without_sign() {
        assert_eq!(encode(0, 5), 0);
        assert_eq!(encode(-0, 15), 0);
    }

    #[test]
    fn negative_zero_pattern_decodes_to_zero() {
        let neg_zero = 1u32 << 5;
        assert_eq!(decode(neg_zero, 5), 0);
        assert_ne!(neg_zero, encode(0, 5));
        assert_eq!(canonical(neg_zero, 5), encode(0, 5));
    }

    #[test]
    fn signed_values() {
        assert_eq!(encode(-31, 5), 0b11_1111);
        assert_eq!(decode(encode(-31, 5), 5), -31);
        assert_eq!(decode(encode(31, 5), 5), 31);
        assert_eq!(decode(encode(-16384, 15), 15), -16384);
    }

    #[test]
    fn canonical_keeps_nonzero_values() {
        for v in [-7, -1, 1, 7] {
            assert_eq!(canonical(encode(v, 5), 5), encode(v, 5));
        }
    }
}
