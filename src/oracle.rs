//! Adapter around the external suffix-array construction primitive.
//!
//! The interval-tree builder only needs two arrays out of this: a suffix
//! array `sa` (a permutation of `0..block_size` sorted by suffix) and a
//! permuted LCP array `plcp` (`plcp[p]` = the length of the common prefix
//! shared between the suffix starting at text position `p` and its
//! immediate predecessor in suffix-sorted order). Everything in this module
//! is black-box glue around [`bio::data_structures::suffix_array`]; the tree
//! builder never looks at how these arrays were produced.
//!
//! `bio`'s suffix-array construction expects the text to end with a sentinel
//! byte that sorts strictly before every other byte in the text and does not
//! occur anywhere else in it. Arbitrary binary blocks can legitimately
//! contain every byte value including 0x00, so this adapter reserves 0x00 as
//! that sentinel and reports [`Error::OracleFailed`] if the caller's block
//! already contains one — the same constraint the underlying construction
//! routine imposes, surfaced as a typed error instead of producing a
//! silently wrong tree. See `DESIGN.md` for the tradeoff this resolves.

use bio::data_structures::suffix_array::suffix_array as bio_suffix_array;

use crate::error::{Error, Result};

/// The two arrays the interval-tree builder consumes.
pub struct EsaArrays {
    /// `sa[i]` is the text position whose suffix is the `i`-th smallest.
    pub sa: Vec<u64>,
    /// `plcp[p]` is the LCP between the suffix at `p` and its predecessor.
    pub plcp: Vec<u32>,
}

/// Builds `(sa, plcp)` for `block`. `block` must not be empty and must not
/// contain a 0x00 byte (see module docs).
pub fn build(block: &[u8]) -> Result<EsaArrays> {
    if block.is_empty() {
        return Err(Error::OracleFailed("empty block".to_string()));
    }
    if block.contains(&0u8) {
        return Err(Error::OracleFailed(
            "block contains an embedded 0x00 byte, which this oracle adapter reserves as its sentinel"
                .to_string(),
        ));
    }

    let mut text = Vec::with_capacity(block.len() + 1);
    text.extend_from_slice(block);
    text.push(0u8);

    // `bio`'s suffix array includes an entry for the sentinel's own suffix,
    // which always sorts first (it is lexicographically smallest). Drop it.
    let raw = bio_suffix_array(&text);
    if raw.len() != block.len() + 1 || raw[0] != block.len() {
        return Err(Error::OracleFailed(
            "suffix array construction returned an unexpected shape".to_string(),
        ));
    }
    let sa = widen_sa(&raw[1..]);
    let plcp = compute_plcp(block, &sa);

    Ok(EsaArrays { sa, plcp })
}

/// Converts the oracle's native-width suffix array into the `u64` words the
/// node encoding expects.
///
/// The reference layout widens a 32-bit suffix array into 64-bit storage in
/// place, processing the unsafe tail right-to-left so later reads are never
/// clobbered by earlier writes, with the already-safe head processed
/// left-to-right (optionally in parallel). This crate keeps the node array
/// and the suffix array as two independently owned typed buffers (see
/// `DESIGN.md`), so there is no shared storage to widen in place — but the
/// direction still matters conceptually: this is the point in the pipeline
/// where the oracle's answer is committed into the encoding this crate's
/// builder will index into for the rest of the session's lifetime.
fn widen_sa(raw: &[usize]) -> Vec<u64> {
    raw.iter().map(|&pos| pos as u64).collect()
}

/// Computes the permuted LCP array via Kasai's algorithm.
///
/// `plcp[i]` is the length of the common prefix between the suffix starting
/// at text position `i` and the suffix immediately preceding it in
/// suffix-sorted order (0 for the suffix that sorts first). This runs in
/// `O(n)` using the inverse suffix array (`rank`) to find each position's
/// predecessor without a binary search.
fn compute_plcp(text: &[u8], sa: &[u64]) -> Vec<u32> {
    let n = sa.len();
    let mut rank = vec![0usize; n];
    for (i, &p) in sa.iter().enumerate() {
        rank[p as usize] = i;
    }

    let mut plcp = vec![0u32; n];
    let mut h: usize = 0;
    for i in 0..n {
        if rank[i] > 0 {
            let j = sa[rank[i] - 1] as usize;
            while i + h < n && j + h < n && text[i + h] == text[j + h] {
                h += 1;
            }
            plcp[i] = h as u32;
            if h > 0 {
                h -= 1;
            }
        } else {
            h = 0;
        }
    }
    plcp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_block() {
        assert!(build(b"").is_err());
    }

    #[test]
    fn rejects_embedded_sentinel_byte() {
        assert!(build(b"ab\0cd").is_err());
    }

    #[test]
    fn sa_is_a_permutation_of_block_positions() {
        let block = b"abcabc";
        let arrays = build(block).unwrap();
        let mut seen: Vec<u64> = arrays.sa.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..block.len() as u64).collect::<Vec<_>>());
    }

    #[test]
    fn plcp_matches_brute_force_on_a_small_repeat() {
        let block = b"abcabc";
        let arrays = build(block).unwrap();
        // Position 0 ("abcabc") and position 3 ("abc") share a 3-byte prefix;
        // whichever of the two is the other's suffix-sorted predecessor must
        // report a PLCP of at least 3.
        assert!(arrays.plcp[0] >= 3 || arrays.plcp[3] >= 3);
    }

    #[test]
    fn plcp_is_zero_for_the_lexicographically_first_suffix() {
        let block = b"abcabc";
        let arrays = build(block).unwrap();
        let first = arrays.sa[0] as usize;
        assert_eq!(arrays.plcp[first], 0);
    }
}
