//! Concrete scenario tests: the worked examples and the error cases they
//! pair with, plus a handful of "crazy expressions" exercising flags,
//! Unicode classes and captures together.

use crate::parse::ErrorKind;
use crate::regexp::Regexp;

fn compile(pattern: &str) -> Regexp {
    Regexp::new(pattern, "").unwrap_or_else(|e| panic!("failed to compile {:?}: {}", pattern, e))
}

fn compile_with(pattern: &str, flags: &str) -> Regexp {
    Regexp::new(pattern, flags).unwrap_or_else(|e| panic!("failed to compile {:?}: {}", pattern, e))
}

#[test]
fn scenario_1_alternation_picks_leftmost_alternative() {
    let re = compile("a(bc|de)f");
    let m = re.execute("xxabcf");
    assert!(m.matched());
    assert_eq!(m.get(0), Some("abcf"));
    assert_eq!(m.get(1), Some("bc"));
}

#[test]
fn scenario_2_lazy_repeat_matches_as_little_as_possible() {
    // `a+?` requires at least one `a` in the group itself, so `(a+?)aaaa`
    // against `"aaaa"` would need 5 `a`s and can never match; `a*?` is the
    // operator that can contribute zero characters to the group, which is
    // what lets the literal `aaaa` tail consume the whole input and group 1
    // come back empty.
    let re = compile("(a*?)aaaa");
    let m = re.execute("aaaa");
    assert!(m.matched());
    assert_eq!(m.get(0), Some("aaaa"));
    assert_eq!(m.get(1), Some(""));
}

#[test]
fn scenario_3_named_captures_resolve_by_name() {
    let re = compile(r"(?<year>\d{4})-(?<month>\d{2})-(?<day>\d{2})");
    let m = re.execute("2024-03-15");
    assert!(m.matched());
    let groups = m.groups();
    assert_eq!(groups.get("year"), Some(&"2024"));
    assert_eq!(groups.get("month"), Some(&"03"));
    assert_eq!(groups.get("day"), Some(&"15"));
}

#[test]
fn scenario_4_anchors_bind_to_the_whole_input_by_default() {
    let re = compile("^hello$");
    let m = re.execute("hello world");
    assert!(!m.matched());
}

#[test]
fn scenario_5_multiline_flag_lets_anchors_bind_per_line() {
    let re = compile_with("^hello$", "m");
    let m = re.execute("hi\nhello\nok");
    assert!(m.matched());
    assert_eq!(m.get(0), Some("hello"));
}

#[test]
fn scenario_6_backreferences_require_exact_repeated_text() {
    let re = compile(r"(.)(.)\2\1");
    let m = re.execute("abba");
    assert!(m.matched());
    assert_eq!(m.get(0), Some("abba"));
    assert_eq!(m.get(1), Some("a"));
    assert_eq!(m.get(2), Some("b"));
}

#[test]
fn scenario_7_ignore_case_flag_folds_ascii_letters() {
    let re = compile_with("hello", "i");
    let m = re.execute("HeLLo");
    assert!(m.matched());
    assert_eq!(m.get(0), Some("HeLLo"));
}

#[test]
fn scenario_8_unicode_letter_category_stops_at_non_letters() {
    let re = compile(r"\p{Letter}+");
    let m = re.execute("Hello 世界");
    assert!(m.matched());
    assert_eq!(m.get(0), Some("Hello"));
}

#[test]
fn scenario_9_unclosed_group_is_missing_parenthesis() {
    let err = Regexp::new("a(b", "").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingParenthesis);
}

#[test]
fn scenario_10_backwards_bounds_is_invalid_repeat_size() {
    let err = Regexp::new("a{5,2}", "").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidRepeatSize);
}

#[test]
fn leftmost_first_prefers_first_alternative_even_if_shorter() {
    let re = compile("a|ab");
    let m = re.execute("ab");
    assert_eq!(m.get(0), Some("a"));
}

#[test]
fn match_and_execute_agree_on_whether_a_match_was_found() {
    for (pattern, text) in [("abc", "xabcx"), ("abc", "xyz")] {
        let re = compile(pattern);
        assert_eq!(re.execute(text).matched(), re.match_(text).is_some());
    }
}

#[test]
fn recorded_captures_fall_within_the_overall_match_span() {
    let re = compile(r"a((b)(c))d");
    let m = re.execute("xabcdx");
    let (s0, e0) = (m.before().len(), m.before().len() + m.get(0).unwrap().len());
    for i in 1..=3 {
        let g = m.get(i).unwrap();
        // every inner group's text is a substring of the overall match
        assert!(m.get(0).unwrap().contains(g));
    }
    assert_eq!(&"xabcdx"[s0..e0], "abcd");
}

#[test]
fn float_literal() {
    let re = compile(r"[-+]?[0-9]*\.?[0-9]+");
    assert_eq!(re.execute("0.1").get(0), Some("0.1"));
    assert_eq!(re.execute("0.1.2").get(0), Some("0.1"));
    assert_eq!(re.execute("a1.2").get(0), Some("1.2"));
    assert!(!compile(r"^[-+]?[0-9]*\.?[0-9]+$").execute("1.a").matched());
}

#[test]
fn email_like_pattern_is_case_insensitive() {
    let re = compile_with(r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,4}\b", "i");
    let m = re.execute("mine is jam.slam@gmail.com ");
    assert_eq!(m.get(0), Some("jam.slam@gmail.com"));
    assert!(!re.execute("mine is jam.slam@gmail ").matched());
}

#[test]
fn date_like_pattern_with_anchors() {
    let re = compile(r"^(19|20)\d\d[-/.](0[1-9]|1[012])[-/.](0[1-9]|[12][0-9]|3[01])$");
    assert!(re.execute("1900-01-01").matched());
    assert!(!re.execute("1900-00-01").matched());
    assert!(!re.execute("1900-13-01").matched());
}

#[test]
fn flags_nest_and_restore_around_scoped_groups() {
    // Outer `(?i:...)` folds case for `a` and `c`; the nested `(?-i:...)`
    // turns case-insensitivity back off just for `b`, then restores it once
    // that inner scope closes.
    let re = compile("(?i:a(?-i:b)c)");
    assert_eq!(re.execute("AbC").get(0), Some("AbC"));
    assert!(!re.execute("ABC").matched());
    assert_eq!(compile_with("(.*)^ab", "sm").execute("\n\n\nab").get(0), Some("\n\n\nab"));
}

#[test]
fn unicode_number_category_and_negation() {
    assert_eq!(compile(r"\p{N}").execute("\u{2160}").get(0), Some("\u{2160}"));
    assert_eq!(compile(r"\P{N}+").execute("ab\u{2160}").get(0), Some("ab"));
    assert_eq!(compile(r"[^\P{N}]+").execute("ab\u{2160}\u{2161}").get(0), Some("\u{2160}\u{2161}"));
}

#[test]
fn unicode_case_folding_crosses_scripts() {
    let re = compile_with("\u{394}", "i"); // capital Greek delta
    assert_eq!(re.execute("\u{3b4}").get(0), Some("\u{3b4}")); // lowercase delta
}

#[test]
fn backslash_b_inside_a_class_means_backspace_not_word_boundary() {
    let re = compile(r"[\b]");
    let m = re.execute("x\u{8}y");
    assert_eq!(m.get(0), Some("\u{8}"));
}

#[test]
fn backslash_zero_is_a_nul_literal_not_a_backreference() {
    let re = compile(r"a\0b");
    let m = re.execute("a\u{0}b");
    assert_eq!(m.get(0), Some("a\u{0}b"));
}

macro_rules! noparse {
    ($name:ident, $pattern:expr, $kind:expr) => {
        #[test]
        fn $name() {
            match Regexp::new($pattern, "") {
                Err(e) => assert_eq!(e.kind, $kind, "pattern {:?} raised {:?}, expected {:?}", $pattern, e.kind, $kind),
                Ok(_) => panic!("pattern {:?} should have failed to compile", $pattern),
            }
        }
    };
}

noparse!(fail_double_repeat, "a**", ErrorKind::InvalidRepeatOp);
noparse!(fail_no_repeat_arg, "*", ErrorKind::InvalidRepeatOp);
noparse!(fail_class_not_closed, "[A", ErrorKind::MissingBracket);
noparse!(fail_class_begin_text_anchor, r"[\A]", ErrorKind::InvalidEscape);
noparse!(fail_open_paren, "(", ErrorKind::MissingParenthesis);
noparse!(fail_close_paren, ")", ErrorKind::UnexpectedParenthesis);
noparse!(fail_invalid_range, "[b-a]", ErrorKind::InvalidCharClass);
noparse!(fail_empty_capture_name, "(?<>a)", ErrorKind::InvalidNamedCapture);
noparse!(fail_bad_capture_name, "(?<na-me>a)", ErrorKind::InvalidNamedCapture);
noparse!(fail_counted_too_big, "a{1001}", ErrorKind::InvalidRepeatSize);
noparse!(fail_unfinished_escape, "\\", ErrorKind::TrailingBackslash);
noparse!(fail_self_referencing_backreference, r"(\1)", ErrorKind::InvalidEscape);
noparse!(fail_backreference_to_missing_group, r"\1", ErrorKind::InvalidEscape);
noparse!(fail_nul_followed_by_digit, r"\01", ErrorKind::InvalidEscape);
