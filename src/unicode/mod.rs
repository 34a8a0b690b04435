//! Unicode data consumed as read-only, in-memory constants.
//!
//! Component B of the spec: general-category ranges, property aliases and
//! the simple case-folding orbit map. Everything here is static data plus
//! binary-search lookups — there is no mutable or lazily-computed state.

mod tables;

pub use tables::CategoryTable;

/// Lower bound of the interval on which `fold_next` is a non-identity
/// mapping for at least one code point.
pub const MIN_FOLD: u32 = 0x41;
/// Upper bound of the interval covered by this crate's folding tables. A
/// code point above this is assumed to have no case variants and folds to
/// itself.
pub const MAX_FOLD: u32 = 0x52F;

/// Look up a general category by its *canonical* name only (`Lu`, `L`, ...).
/// For user-facing lookups (which may use a long alias like `Letter`), use
/// [`lookup_category`].
pub fn general_category(name: &str) -> Option<&'static [(u32, u32)]> {
    tables::GENERAL_CATEGORY
        .binary_search_by_key(&name, |&(n, _)| n)
        .ok()
        .map(|i| tables::GENERAL_CATEGORY[i].1)
}

/// Resolve `name` through the alias table to a canonical category name, then
/// look up its ranges. This is what `\p{Name}` parsing should call.
pub fn lookup_category(name: &str) -> Option<&'static [(u32, u32)]> {
    let canonical = tables::CATEGORY_ALIASES
        .binary_search_by_key(&name, |&(alias, _)| alias)
        .ok()
        .map(|i| tables::CATEGORY_ALIASES[i].1)?;
    general_category(canonical)
}

/// The next code point in `cp`'s simple case-folding orbit. Applying this
/// repeatedly visits every other member of the orbit exactly once before
/// cycling back to `cp`. Code points with no case variant are fixed points:
/// `fold_next(cp) == cp`.
pub fn fold_next(cp: u32) -> u32 {
    if let Ok(i) = tables::FOLD_ORBIT_EXTRA.binary_search_by_key(&cp, |&(k, _)| k) {
        return tables::FOLD_ORBIT_EXTRA[i].1;
    }
    match cp {
        0x41..=0x5A => cp + 32,                    // A-Z -> a-z
        0x61..=0x7A => cp - 32,                    // a-z -> A-Z
        0xC0..=0xD6 | 0xD8..=0xDE => cp + 32,       // Latin-1 upper -> lower
        0xE0..=0xF6 | 0xF8..=0xFE => cp - 32,       // Latin-1 lower -> upper
        0x391..=0x3A1 | 0x3A4..=0x3AB => cp + 32,   // Greek upper -> lower (sigma handled above)
        0x3B1..=0x3C1 | 0x3C4..=0x3CB => cp - 32,   // Greek lower -> upper
        0x410..=0x42F => cp + 32,                   // Cyrillic upper -> lower
        0x430..=0x44F => cp - 32,                   // Cyrillic lower -> upper
        0x400..=0x40F => cp + 80,                   // Cyrillic supplement upper -> lower
        0x450..=0x45F => cp - 80,                   // Cyrillic supplement lower -> upper
        _ => cp,
    }
}

/// All code points in `cp`'s case-folding orbit other than `cp` itself.
pub fn fold_orbit(cp: u32) -> Vec<u32> {
    let mut out = Vec::new();
    let mut next = fold_next(cp);
    while next != cp {
        out.push(next);
        next = fold_next(next);
        if out.len() > 16 {
            // A well-formed orbit table always cycles back to `cp` in a
            // handful of steps; this is a defensive bound against a
            // malformed table entry creating a non-cyclic chain.
            break;
        }
    }
    out
}
