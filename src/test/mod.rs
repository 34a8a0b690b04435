//! Test-only helpers shared by the property and scenario suites.

use quickcheck::Gen;

mod tests;

/// Generates a random string drawn from an alphabet weighted toward regex
/// metacharacters, so quickcheck spends most of its budget near patterns
/// that actually exercise the parser's error paths instead of plain text.
fn gen_regex_str(g: &mut Gen, len: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             ~!@#$%^&*(){},.[]\n \\-+?|^$:<>";
    (0..len).map(|_| *g.choose(CHARSET).unwrap() as char).collect()
}
