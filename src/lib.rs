//! A Perl/ECMAScript-flavored regular expression engine built around a
//! Thompson/Pike "N threads in lock-step" virtual machine, giving
//! linear-time matching (`O(program size * input size)`) with leftmost-first
//! submatch semantics for every pattern that doesn't use a backreference.
//!
//! ```
//! use regexp::Regexp;
//!
//! let re = Regexp::new(r"(?<year>\d{4})-(?<month>\d{2})-(?<day>\d{2})", "").unwrap();
//! let m = re.execute("born 2024-03-15");
//! assert!(m.matched());
//! assert_eq!(m.groups().get("year"), Some(&"2024"));
//! ```

#![allow(dead_code)]

pub mod ast;
pub mod class;
pub mod compile;
pub mod parse;
pub mod regexp;
pub mod unicode;
pub mod vm;

#[cfg(test)]
mod test;

pub use parse::{Error, ErrorKind};
pub use regexp::{MatchResult, Regexp};

/// Escapes every regular expression metacharacter in `s` so the result
/// matches `s` literally when used as a pattern (or a fragment of one).
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len());
    for c in s.chars() {
        if parse::is_meta(c) {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted
}

/// Reports whether `pattern` matches anywhere in `text`.
pub fn is_match(pattern: &str, text: &str) -> Result<bool, Error> {
    Regexp::new(pattern, "").map(|r| r.execute(text).matched())
}
