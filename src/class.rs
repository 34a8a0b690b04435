//! Character-range utilities shared by the parser, the compiler and the VM.
//!
//! A *range list* is a `Vec<(u32, u32)>` of inclusive `[start, end]` pairs
//! over Unicode scalar values. `simplify` brings a range list into
//! normalized form (sorted, non-overlapping, non-adjacent); every other
//! function in this module assumes its input is already normalized unless
//! documented otherwise.

use crate::unicode;

/// Largest Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// An inclusive, unordered range of code points. Ordering and overlap are
/// resolved by `simplify`.
pub type RangeList = Vec<(u32, u32)>;

/// Sort by start, then merge overlapping or adjacent ranges.
///
/// Idempotent: `simplify(simplify(r)) == simplify(r)`.
pub fn simplify(mut ranges: RangeList) -> RangeList {
    if ranges.is_empty() {
        return ranges;
    }
    ranges.sort_by_key(|&(s, _)| s);

    let mut merged = Vec::with_capacity(ranges.len());
    let mut cur = ranges[0];
    for &(s, e) in &ranges[1..] {
        debug_assert!(s <= e, "invalid range ({}, {})", s, e);
        if s <= cur.1.saturating_add(1) {
            cur.1 = cur.1.max(e);
        } else {
            merged.push(cur);
            cur = (s, e);
        }
    }
    merged.push(cur);
    merged
}

/// Compute `[0, MAX_CODEPOINT] \ simplify(ranges)`.
pub fn complement(ranges: RangeList) -> RangeList {
    let ranges = simplify(ranges);
    if ranges.is_empty() {
        return vec![(0, MAX_CODEPOINT)];
    }

    let mut out = Vec::with_capacity(ranges.len() + 1);
    let mut next_start = 0u32;
    for &(s, e) in &ranges {
        if next_start < s {
            out.push((next_start, s - 1));
        }
        next_start = e.saturating_add(1);
        if e == u32::MAX {
            break;
        }
    }
    if next_start <= MAX_CODEPOINT {
        out.push((next_start, MAX_CODEPOINT));
    }
    out
}

/// Binary-search membership test. `ranges` must already be normalized.
pub fn contains(ranges: &[(u32, u32)], cp: u32) -> bool {
    ranges
        .binary_search_by(|&(s, e)| {
            if cp < s {
                std::cmp::Ordering::Greater
            } else if cp > e {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Expand `ranges` to include every code point reachable from any member via
/// the simple case-folding orbit, then re-normalize.
///
/// Code points outside `[MIN_FOLD, MAX_FOLD]` pass through unchanged, since
/// the fold map is only defined (as a non-identity mapping) on that
/// interval.
pub fn case_fold_expand(ranges: RangeList) -> RangeList {
    let mut out = ranges.clone();
    for &(s, e) in &ranges {
        let lo = s.max(unicode::MIN_FOLD);
        let hi = e.min(unicode::MAX_FOLD);
        let mut cp = lo;
        while cp <= hi {
            for orbit_cp in unicode::fold_orbit(cp) {
                out.push((orbit_cp, orbit_cp));
            }
            if cp == u32::MAX {
                break;
            }
            cp += 1;
        }
    }
    simplify(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_merges_overlapping_and_adjacent() {
        let r = vec![(5, 10), (1, 3), (4, 4), (20, 25), (11, 12)];
        assert_eq!(simplify(r), vec![(1, 12), (20, 25)]);
    }

    #[test]
    fn simplify_empty_is_empty() {
        assert_eq!(simplify(vec![]), vec![]);
    }

    #[test]
    fn simplify_is_idempotent() {
        let r = vec![(5, 10), (1, 3), (4, 4), (20, 25)];
        let once = simplify(r);
        let twice = simplify(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn complement_of_empty_is_everything() {
        assert_eq!(complement(vec![]), vec![(0, MAX_CODEPOINT)]);
    }

    #[test]
    fn complement_round_trips() {
        let r = simplify(vec![(5, 10), (20, 25)]);
        let c = complement(r.clone());
        assert_eq!(complement(c), r);
    }

    #[test]
    fn contains_binary_searches() {
        let r = simplify(vec![(5, 10), (20, 25)]);
        assert!(contains(&r, 7));
        assert!(contains(&r, 20));
        assert!(!contains(&r, 11));
        assert!(!contains(&r, 26));
    }

    #[test]
    fn contains_matches_membership_after_simplify() {
        let raw = vec![(5, 10), (8, 12), (1, 1)];
        let simplified = simplify(raw);
        for c in 0..30u32 {
            let naive = [(5u32, 10u32), (8, 12), (1, 1)]
                .iter()
                .any(|&(s, e)| c >= s && c <= e);
            assert_eq!(contains(&simplified, c), naive, "mismatch at {}", c);
        }
    }
}
