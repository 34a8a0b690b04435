//! The user-facing wrapper around a compiled program: `Regexp` owns the
//! program and exposes `execute`/`match_` plus group introspection;
//! `MatchResult` is the immutable view returned by a single match attempt.

use std::collections::HashMap;

use crate::compile::Program;
use crate::parse::{self, Error};
use crate::vm::{self, MatchKind};

/// A compiled regular expression. Cheap to share (it's just a `Program`
/// plus the original pattern text) and safe to use from multiple threads at
/// once — `execute` allocates only call-local scratch.
pub struct Regexp {
    pattern: String,
    prog: Program,
}

impl Regexp {
    /// Parses and compiles `pattern`. `flags` is the external flag string
    /// (`m`, `s`, `i` in any combination/order; unrecognized characters are
    /// ignored, matching `parse::parse`).
    pub fn new(pattern: &str, flags: &str) -> Result<Regexp, Error> {
        let parsed = parse::parse(pattern, flags)?;
        let prog = Program::compile(&parsed);
        Ok(Regexp { pattern: pattern.to_owned(), prog })
    }

    /// The pattern text this regexp was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Total number of capture groups, including group 0 (the whole match).
    pub fn group_count(&self) -> usize {
        self.prog.capture_count as usize
    }

    /// Names of every named capture group, in the order their groups were
    /// numbered (group 0 is never named and so never appears here).
    pub fn group_names(&self) -> Vec<&str> {
        self.prog.names.iter().filter_map(|n| n.as_deref()).collect()
    }

    /// The capture group index bound to `name`, if any.
    pub fn group_by_name(&self, name: &str) -> Option<usize> {
        self.prog.names.iter().position(|n| n.as_deref() == Some(name))
    }

    /// Runs the VM against `text` and returns a result view. Always returns
    /// a `MatchResult`; call `.matched()` to tell a match from a non-match.
    pub fn execute<'r, 't>(&'r self, text: &'t str) -> MatchResult<'r, 't> {
        let chars: Vec<char> = text.chars().collect();
        let byte_offsets = char_byte_offsets(text, chars.len());
        let locs = vm::run(MatchKind::Submatches, &self.prog, &chars, 0, chars.len());
        let pairs = vm::unflatten(&locs);
        let byte_pairs = pairs
            .into_iter()
            .map(|p| p.map(|(s, e)| (byte_offsets[s], byte_offsets[e])))
            .collect();
        MatchResult { regex: self, text, locs: byte_pairs }
    }

    /// Convenience wrapper over `execute` that collapses the no-match case
    /// to `None` instead of a `MatchResult` with `.matched() == false`.
    pub fn match_<'r, 't>(&'r self, text: &'t str) -> Option<MatchResult<'r, 't>> {
        let result = self.execute(text);
        if result.matched() {
            Some(result)
        } else {
            None
        }
    }
}

/// `offsets[i]` is the byte offset of the `i`-th code point in `text`;
/// `offsets[nchars]` is `text.len()`. Lets `execute` convert the VM's
/// code-point indexed capture positions back into byte offsets for slicing
/// `text` directly, in one linear pass.
fn char_byte_offsets(text: &str, nchars: usize) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(nchars + 1);
    offsets.extend(text.char_indices().map(|(b, _)| b));
    offsets.push(text.len());
    offsets
}

/// The result of matching a `Regexp` against one string. Borrows both the
/// `Regexp` (for group names) and the subject text (for substring slices),
/// so it can't outlive either.
pub struct MatchResult<'r, 't> {
    regex: &'r Regexp,
    text: &'t str,
    locs: Vec<Option<(usize, usize)>>,
}

impl<'r, 't> MatchResult<'r, 't> {
    /// Whether a match was found at all.
    pub fn matched(&self) -> bool {
        matches!(self.locs.first(), Some(Some(_)))
    }

    /// The substring captured by group `i`, or `None` if `i` is out of
    /// range or that group didn't participate in the match.
    pub fn get(&self, i: usize) -> Option<&'t str> {
        self.locs.get(i).copied().flatten().map(|(s, e)| &self.text[s..e])
    }

    /// One entry per capture group (length `group_count()`), in order.
    pub fn results(&self) -> Vec<Option<&'t str>> {
        (0..self.regex.group_count()).map(|i| self.get(i)).collect()
    }

    /// Named groups that captured on this match, keyed by name.
    pub fn groups(&self) -> HashMap<String, &'t str> {
        let mut out = HashMap::new();
        for (i, name) in self.regex.prog.names.iter().enumerate() {
            if let Some(name) = name {
                if let Some(s) = self.get(i) {
                    out.insert(name.clone(), s);
                }
            }
        }
        out
    }

    /// The text before the overall match, or the whole input if there was
    /// no match.
    pub fn before(&self) -> &'t str {
        match self.locs.first().copied().flatten() {
            Some((s, _)) => &self.text[..s],
            None => self.text,
        }
    }

    /// The text after the overall match, or the empty string if there was
    /// no match.
    pub fn after(&self) -> &'t str {
        match self.locs.first().copied().flatten() {
            Some((_, e)) => &self.text[e..],
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_and_slices_before_after() {
        let re = Regexp::new(r"a(bc|de)f", "").unwrap();
        let m = re.execute("xxabcf");
        assert!(m.matched());
        assert_eq!(m.get(0), Some("abcf"));
        assert_eq!(m.get(1), Some("bc"));
        assert_eq!(m.before(), "xx");
        assert_eq!(m.after(), "");
    }

    #[test]
    fn no_match_before_after_are_whole_input_and_empty() {
        let re = Regexp::new("zzz", "").unwrap();
        let m = re.execute("abc");
        assert!(!m.matched());
        assert_eq!(m.before(), "abc");
        assert_eq!(m.after(), "");
        assert_eq!(m.get(0), None);
    }

    #[test]
    fn named_groups_surface_through_groups_and_group_by_name() {
        let re = Regexp::new(r"(?<year>\d{4})-(?<month>\d{2})-(?<day>\d{2})", "").unwrap();
        let m = re.execute("2024-03-15");
        assert!(m.matched());
        let groups = m.groups();
        assert_eq!(groups.get("year"), Some(&"2024"));
        assert_eq!(groups.get("month"), Some(&"03"));
        assert_eq!(groups.get("day"), Some(&"15"));
        assert_eq!(re.group_by_name("month"), Some(2));
    }

    #[test]
    fn match_convenience_collapses_non_match_to_none() {
        let re = Regexp::new("abc", "").unwrap();
        assert!(re.match_("xabcx").is_some());
        assert!(re.match_("xyz").is_none());
    }

    #[test]
    fn results_has_one_entry_per_group() {
        let re = Regexp::new(r"(a)(b)?", "").unwrap();
        let m = re.execute("a");
        let results = m.results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Some("a"));
        assert_eq!(results[1], Some("a"));
        assert_eq!(results[2], None);
    }
}
