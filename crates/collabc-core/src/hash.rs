//! Order-independent hash for set-like collections.
//!
//! Element hashes are mixed individually and combined with XOR, so the
//! result does not depend on iteration order. Two sets with the same
//! elements therefore hash equally whatever their backing structure.

const SEED_MULT: u64 = 1_927_868_237;
const MIX_XOR: u64 = 89_869_747;
const MIX_MULT: u64 = 3_644_798_167;
const FINAL_MULT: u64 = 69_069;
const FINAL_ADD: u64 = 907_133_923;
/// Substitute for the all-ones result.
const ALL_ONES_REPLACEMENT: u64 = 590_923_713;

/// Spread one element hash before it is folded into the accumulator.
#[inline]
fn mix(element_hash: u64) -> u64 {
    (element_hash ^ (element_hash << 16) ^ MIX_XOR).wrapping_mul(MIX_MULT)
}

/// Combine `len` element hashes into a single order-independent hash.
///
/// `len` must be the number of elements the hashes come from; it seeds the
/// accumulator so that sets of different sizes diverge early.
pub fn unordered_hash<I>(len: usize, element_hashes: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let mut acc = SEED_MULT.wrapping_mul(len as u64 + 1);
    for element_hash in element_hashes {
        acc ^= mix(element_hash);
    }
    acc = acc.wrapping_mul(FINAL_MULT).wrapping_add(FINAL_ADD);

    // Wrapping arithmetic already folds to 64 bits; the all-ones value is
    // kept free so it never collides with a "no hash" marker.
    if acc == u64::MAX {
        acc = ALL_ONES_REPLACEMENT;
    }
    acc
}
