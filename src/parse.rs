//! Recursive-descent, single-pass parser: pattern text -> AST.
//!
//! Structurally this follows the teacher's `Parser`/`BuildAst` stack machine
//! (`pos_last`/`concat`/`alternate`/`build_from` reduce the stack whenever a
//! `)`, `|` or end-of-pattern is reached) rather than a textbook recursive
//! descent with one function per grammar rule — the stack machine handles
//! alternation priority and capture wrapping with less bookkeeping than a
//! naive recursive version would need.

use log::trace;

use crate::ast::{Assertion, Ast, ParseResult};
use crate::class;
use crate::unicode;

const MAX_REPEAT: u32 = 1000;

/// Parser/compiler flags. `ignore_case` is resolved to concrete case-folded
/// ranges at parse time (see `class::case_fold_expand`); the VM never sees
/// it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub multiline: bool,
    pub singleline: bool,
    pub ignore_case: bool,
}

/// The kinds of error parsing can raise. The compiler and VM never error —
/// only parsing does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InternalError,
    InvalidCharClass,
    InvalidEscape,
    InvalidNamedCapture,
    InvalidRepeatOp,
    InvalidRepeatSize,
    MissingBracket,
    MissingParenthesis,
    MissingRepeatArgument,
    TrailingBackslash,
    UnexpectedParenthesis,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::InternalError => "internal error",
            ErrorKind::InvalidCharClass => "invalid character class",
            ErrorKind::InvalidEscape => "invalid escape sequence",
            ErrorKind::InvalidNamedCapture => "invalid named capture",
            ErrorKind::InvalidRepeatOp => "invalid repeat operator",
            ErrorKind::InvalidRepeatSize => "invalid repeat size",
            ErrorKind::MissingBracket => "missing closing bracket",
            ErrorKind::MissingParenthesis => "missing closing parenthesis",
            ErrorKind::MissingRepeatArgument => "missing repeat argument",
            ErrorKind::TrailingBackslash => "trailing backslash",
            ErrorKind::UnexpectedParenthesis => "unexpected closing parenthesis",
        };
        f.write_str(s)
    }
}

/// A parse error. `fragment` is the unconsumed suffix of the pattern at the
/// point of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub pos: usize,
    pub kind: ErrorKind,
    pub fragment: String,
    pub msg: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} near position {}: {} (remaining: {:?})",
               self.kind, self.pos, self.msg, self.fragment)
    }
}

impl std::error::Error for Error {}

type PResult<T> = Result<T, Error>;

enum BuildItem {
    Node(Ast),
    Paren { flags: Flags, capture: Option<u32>, name: Option<String> },
    Bar,
}

impl BuildItem {
    fn is_paren(&self) -> bool {
        matches!(self, BuildItem::Paren { .. })
    }

    fn is_bar(&self) -> bool {
        matches!(self, BuildItem::Bar)
    }
}

pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    stack: Vec<BuildItem>,
    flags: Flags,
    caps: u32,
    open_captures: Vec<u32>,
    names: Vec<(String, u32)>,
    has_backreference: bool,
}

/// Parses `pattern` under the external flags parsed from `flags_str`
/// (`m`, `s`, `i` in any combination/order; unrecognized characters are
/// ignored).
pub fn parse(pattern: &str, flags_str: &str) -> PResult<ParseResult> {
    let mut flags = Flags::default();
    for c in flags_str.chars() {
        match c {
            'm' => flags.multiline = true,
            's' => flags.singleline = true,
            'i' => flags.ignore_case = true,
            _ => {}
        }
    }
    Parser {
        chars: pattern.chars().collect(),
        pos: 0,
        stack: Vec::new(),
        flags,
        caps: 0,
        open_captures: Vec::new(),
        names: Vec::new(),
        has_backreference: false,
    }
    .parse()
}

impl Parser {
    fn parse(&mut self) -> PResult<ParseResult> {
        while self.pos < self.chars.len() {
            let c = self.cur();
            trace!("parse: pos={} char={:?}", self.pos, c);
            match c {
                '*' | '+' | '?' => self.push_repeater(c)?,
                '\\' => {
                    let ast = self.parse_escape()?;
                    self.push(ast);
                }
                '{' => self.parse_counted()?,
                '[' => self.parse_class()?,
                '(' => self.parse_group_open()?,
                ')' => self.parse_group_close()?,
                '|' => {
                    let catfrom = self.pos_last(|x| x.is_paren() || x.is_bar());
                    self.concat(catfrom)?;
                    self.stack.push(BuildItem::Bar);
                }
                _ => self.push_literal(c),
            }
            self.advance();
        }

        if self.stack.iter().any(|x| x.is_paren()) {
            return self.err(ErrorKind::MissingParenthesis, "unclosed '('");
        }
        let catfrom = self.pos_last(|x| x.is_bar());
        self.concat(catfrom)?;
        self.alternate(0)?;

        if self.stack.len() != 1 {
            return self.err(ErrorKind::InternalError, "parser stack did not reduce to one node");
        }
        let ast = self.pop_ast()?;
        Ok(ParseResult {
            ast,
            capture_count: self.caps + 1,
            name_to_index: std::mem::take(&mut self.names),
            has_backreference: self.has_backreference,
        })
    }

    // ---- stack manipulation -------------------------------------------

    fn push(&mut self, ast: Ast) {
        self.stack.push(BuildItem::Node(ast));
    }

    fn pop_ast(&mut self) -> PResult<Ast> {
        match self.stack.pop() {
            Some(BuildItem::Node(ast)) => Ok(ast),
            _ => self.err(ErrorKind::InternalError, "expected an AST node on the stack"),
        }
    }

    /// Index to reduce *from*: one past the nearest stack item (searching
    /// from the top) matching `pred`, or `0` if nothing matches.
    fn pos_last(&self, pred: impl Fn(&BuildItem) -> bool) -> usize {
        match self.stack.iter().rev().position(pred) {
            Some(from_end) => self.stack.len() - from_end,
            None => 0,
        }
    }

    fn concat(&mut self, from: usize) -> PResult<()> {
        if from > self.stack.len() {
            return self.err(ErrorKind::InternalError, "concat index out of range");
        }
        let mut items = Vec::new();
        while self.stack.len() > from {
            match self.stack.pop().unwrap() {
                BuildItem::Node(ast) => items.push(ast),
                BuildItem::Paren { .. } | BuildItem::Bar => {
                    return self.err(ErrorKind::InternalError, "unexpected marker in concat range");
                }
            }
        }
        items.reverse();
        let ast = match items.len() {
            0 => Ast::Empty,
            1 => items.into_iter().next().unwrap(),
            _ => Ast::Concat(items),
        };
        self.push(ast);
        Ok(())
    }

    /// Folds stack items from `from` up to (and discarding) the `(` or start
    /// of pattern into a right-leaning `Alternate` chain, preserving
    /// leftmost-first priority.
    fn alternate(&mut self, from: usize) -> PResult<()> {
        if from >= self.stack.len() {
            return self.err(ErrorKind::InternalError, "empty alternation reduction range");
        }
        let mut combined = self.pop_ast()?;
        while self.stack.len() > from {
            match self.stack.pop().unwrap() {
                BuildItem::Node(ast) => combined = Ast::Alternate(Box::new(ast), Box::new(combined)),
                BuildItem::Bar => {}
                BuildItem::Paren { .. } => {
                    return self.err(ErrorKind::InternalError, "unexpected paren in alternate range");
                }
            }
        }
        self.push(combined);
        Ok(())
    }

    // ---- literals, repeaters -------------------------------------------

    fn push_literal(&mut self, c: char) {
        let ast = match c {
            '.' => Ast::CharClass {
                ranges: if self.flags.singleline {
                    vec![(0, class::MAX_CODEPOINT)]
                } else {
                    vec![(0, '\n' as u32 - 1), ('\n' as u32 + 1, class::MAX_CODEPOINT)]
                },
                negated: false,
            },
            '^' => Ast::Assertion(if self.flags.multiline { Assertion::BeginLine } else { Assertion::BeginText }),
            '$' => Ast::Assertion(if self.flags.multiline { Assertion::EndLine } else { Assertion::EndText }),
            _ => self.literal_class(c as u32),
        };
        self.push(ast);
    }

    fn literal_class(&self, cp: u32) -> Ast {
        let ranges = if self.flags.ignore_case {
            class::case_fold_expand(vec![(cp, cp)])
        } else {
            vec![(cp, cp)]
        };
        Ast::CharClass { ranges, negated: false }
    }

    fn push_repeater(&mut self, c: char) -> PResult<()> {
        if !matches!(self.stack.last(), Some(BuildItem::Node(_))) {
            return self.err(ErrorKind::InvalidRepeatOp, "a repeat operator must follow an expression");
        }
        if matches!(self.peek(1), Some('*') | Some('+')) {
            return self.err(ErrorKind::InvalidRepeatOp, "double repeat operators are not allowed");
        }
        let inner = Box::new(self.pop_ast()?);
        let greedy = self.consume_trailing_lazy_mark();
        let ast = match c {
            '*' => Ast::ZeroOrMore { inner, greedy },
            '+' => Ast::OneOrMore { inner, greedy },
            '?' => Ast::ZeroOrOne { inner, greedy },
            _ => return self.err(ErrorKind::InternalError, "not a repeat operator"),
        };
        self.push(ast);
        Ok(())
    }

    /// Returns whether the quantifier is greedy, consuming a trailing `?`
    /// (lazy marker) if present.
    fn consume_trailing_lazy_mark(&mut self) -> bool {
        if self.peek(1) == Some('?') {
            self.advance();
            false
        } else {
            true
        }
    }

    // ---- counted repetition --------------------------------------------

    fn parse_counted(&mut self) -> PResult<()> {
        let start = self.pos;
        let closer = match self.find_from(self.pos, '}') {
            Some(i) => i,
            None => return self.err(ErrorKind::InvalidRepeatOp, "unclosed '{' for counted repetition"),
        };
        let inner_str: String = self.chars[start + 1..closer].iter().collect();
        self.pos = closer;
        let greedy = self.consume_trailing_lazy_mark();

        if inner_str.matches(',').count() > 1 {
            return self.err(ErrorKind::InvalidRepeatOp, "too many commas in counted repetition");
        }

        let (min, max): (u32, Option<u32>) = if !inner_str.contains(',') {
            if inner_str.is_empty() {
                return self.err(ErrorKind::MissingRepeatArgument, "counted repetition has no number");
            }
            let n = self.parse_u32(&inner_str)?;
            (n, Some(n))
        } else {
            let mut parts = inner_str.splitn(2, ',');
            let smin = parts.next().unwrap();
            let smax = parts.next().unwrap();
            if smin.is_empty() {
                return self.err(ErrorKind::MissingRepeatArgument, "counted repetition is missing its minimum");
            }
            let min = self.parse_u32(smin)?;
            let max = if smax.is_empty() { None } else { Some(self.parse_u32(smax)?) };
            (min, max)
        };

        if min > MAX_REPEAT || max.map(|m| m > MAX_REPEAT).unwrap_or(false) {
            return self.err(ErrorKind::InvalidRepeatSize, "repeat count exceeds the maximum allowed");
        }
        if let Some(m) = max {
            if m < min {
                return self.err(ErrorKind::InvalidRepeatSize, "max repetitions is smaller than min repetitions");
            }
        }

        if !matches!(self.stack.last(), Some(BuildItem::Node(_))) {
            return self.err(ErrorKind::InvalidRepeatOp, "a repeat operator must follow an expression");
        }
        let inner = Box::new(self.pop_ast()?);
        self.push(Ast::Repeat { inner, greedy, min, max });
        Ok(())
    }

    fn parse_u32(&self, s: &str) -> PResult<u32> {
        s.parse::<u32>()
            .map_err(|_| self.make_err(ErrorKind::InvalidRepeatOp, format!("'{}' is not a valid repeat count", s)))
    }

    // ---- groups ----------------------------------------------------------

    fn parse_group_open(&mut self) -> PResult<()> {
        if self.peek(1) != Some('?') {
            self.caps += 1;
            let idx = self.caps;
            self.open_captures.push(idx);
            self.stack.push(BuildItem::Paren { flags: self.flags, capture: Some(idx), name: None });
            return Ok(());
        }
        self.advance(); // consume '?'
        match self.peek(1) {
            Some('<') => self.parse_named_capture(),
            Some(':') => {
                self.advance(); // consume ':'
                self.stack.push(BuildItem::Paren { flags: self.flags, capture: None, name: None });
                Ok(())
            }
            _ => self.parse_flag_group(),
        }
    }

    fn parse_named_capture(&mut self) -> PResult<()> {
        self.advance(); // at '<'
        self.advance(); // now just past '<'
        let name_start = self.pos;
        let closer = match self.find_from(self.pos, '>') {
            Some(i) => i,
            None => return self.err(ErrorKind::InvalidNamedCapture, "capture name must end with '>'"),
        };
        if closer == name_start {
            return self.err(ErrorKind::InvalidNamedCapture, "capture names must have at least 1 character");
        }
        let name: String = self.chars[name_start..closer].iter().collect();
        let mut chars = name.chars();
        let first = chars.next().unwrap();
        if !(first.is_alphabetic() || first == '_') {
            return self.err(ErrorKind::InvalidNamedCapture, "capture name has an invalid first character");
        }
        if !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return self.err(ErrorKind::InvalidNamedCapture, "capture names may only contain letters, digits and underscores");
        }
        if self.names.iter().any(|(n, _)| n == &name) {
            return self.err(ErrorKind::InvalidNamedCapture, "duplicate capture name");
        }
        self.pos = closer - 1; // advance() in the main loop steps onto closer
        self.caps += 1;
        let idx = self.caps;
        self.open_captures.push(idx);
        self.names.push((name.clone(), idx));
        self.stack.push(BuildItem::Paren { flags: self.flags, capture: Some(idx), name: Some(name) });
        Ok(())
    }

    fn parse_flag_group(&mut self) -> PResult<()> {
        let start = self.pos;
        let mut flags = self.flags;
        let mut negate = false;
        loop {
            self.advance();
            if self.pos >= self.chars.len() {
                return self.err(ErrorKind::MissingParenthesis, "unterminated flag group");
            }
            match self.cur() {
                'm' => flags.multiline = !negate,
                's' => flags.singleline = !negate,
                'i' => flags.ignore_case = !negate,
                '-' if !negate => negate = true,
                ':' => {
                    self.stack.push(BuildItem::Paren { flags: self.flags, capture: None, name: None });
                    self.flags = flags;
                    return Ok(());
                }
                _ => {
                    return self.err(
                        ErrorKind::MissingParenthesis,
                        format!("unrecognized flag group starting at {}", start),
                    )
                }
            }
        }
    }

    fn parse_group_close(&mut self) -> PResult<()> {
        if !self.stack.iter().any(|x| x.is_paren()) {
            return self.err(ErrorKind::UnexpectedParenthesis, "no matching opening parenthesis");
        }
        let catfrom = self.pos_last(|x| x.is_paren() || x.is_bar());
        self.concat(catfrom)?;

        let altfrom = self.pos_last(|x| x.is_paren());
        let (capture, old_flags) = match &self.stack[altfrom - 1] {
            BuildItem::Paren { flags, capture, .. } => (*capture, *flags),
            _ => return self.err(ErrorKind::InternalError, "expected paren marker"),
        };
        self.alternate(altfrom)?;
        self.flags = old_flags;

        // Discard the paren marker itself.
        let ast = self.pop_ast()?;
        match self.stack.pop() {
            Some(BuildItem::Paren { .. }) => {}
            _ => return self.err(ErrorKind::InternalError, "expected paren marker to discard"),
        }

        if let Some(idx) = capture {
            self.open_captures.retain(|&i| i != idx);
            self.push(Ast::Capture { inner: Box::new(ast), index: idx });
        } else {
            self.push(ast);
        }
        Ok(())
    }

    // ---- character classes ----------------------------------------------

    fn parse_class(&mut self) -> PResult<()> {
        let class_start = self.pos;
        let negated = self.peek(1) == Some('^');
        if negated {
            self.advance();
        }
        let mut ranges: Vec<(u32, u32)> = Vec::new();

        // A literal '-' or ']' is permitted immediately after '[' / '[^'.
        if self.peek(1) == Some('-') {
            self.advance();
            ranges.push(('-' as u32, '-' as u32));
        }
        if self.peek(1) == Some(']') {
            self.advance();
            ranges.push((']' as u32, ']' as u32));
        }
        self.advance();

        loop {
            if self.pos >= self.chars.len() {
                return self.err(ErrorKind::MissingBracket, "unclosed character class");
            }
            let c = self.cur();
            if c == ']' {
                let ranges = class::simplify(ranges);
                let ranges = if self.flags.ignore_case { class::case_fold_expand(ranges) } else { ranges };
                self.push(Ast::CharClass { ranges, negated });
                return Ok(());
            }
            if c == '\\' {
                match self.parse_class_escape()? {
                    ClassPiece::Ranges(sub) => {
                        ranges.extend(sub);
                        self.advance();
                    }
                    ClassPiece::Literal(cp) => {
                        self.push_class_member(&mut ranges, cp, class_start)?;
                    }
                }
                continue;
            }
            self.push_class_member(&mut ranges, c as u32, class_start)?;
        }
    }

    /// Handles `c` (or `c-d`) as a member of the class currently being
    /// parsed, consuming the trailing range end if present. Leaves `self.pos`
    /// on the last character consumed (the caller's loop calls `advance`).
    fn push_class_member(&mut self, ranges: &mut Vec<(u32, u32)>, start_cp: u32, class_start: usize) -> PResult<()> {
        if self.peek(1) == Some('-') && self.peek(2).is_some() && self.peek(2) != Some(']') {
            self.advance();
            self.advance();
            let end_cp = if self.cur() == '\\' {
                match self.parse_class_escape()? {
                    ClassPiece::Literal(cp) => cp,
                    ClassPiece::Ranges(_) => {
                        return self.err(ErrorKind::InvalidCharClass, "range endpoint cannot be a built-in class");
                    }
                }
            } else {
                self.cur() as u32
            };
            if end_cp < start_cp {
                return self.err(
                    ErrorKind::InvalidCharClass,
                    format!("invalid range in character class starting at {}", class_start),
                );
            }
            ranges.push((start_cp, end_cp));
        } else {
            ranges.push((start_cp, start_cp));
        }
        self.advance();
        Ok(())
    }

    /// Parses a single escape sequence inside `[...]`. Assumes `self.cur()`
    /// is `\`. Leaves `self.pos` on the last character of the escape.
    fn parse_class_escape(&mut self) -> PResult<ClassPiece> {
        self.advance();
        if self.pos >= self.chars.len() {
            return self.err(ErrorKind::TrailingBackslash, "pattern ends with a backslash");
        }
        let c = self.cur();
        match c {
            'b' => Ok(ClassPiece::Literal(0x08)),
            'k' | 'c' => self.err(ErrorKind::InvalidEscape, format!("\\{} is not valid inside a character class", c)),
            'd' | 'D' | 'w' | 'W' | 's' | 'S' => Ok(ClassPiece::Ranges(self.perl_class_ranges(c))),
            'p' | 'P' => Ok(ClassPiece::Ranges(self.parse_unicode_class_ranges()?)),
            _ => match self.parse_common_escape(c)? {
                CommonEscape::Literal(cp) => Ok(ClassPiece::Literal(cp)),
                CommonEscape::Assertion(_) => {
                    self.err(ErrorKind::InvalidEscape, "\\A, \\z, \\b and \\B are not valid inside a character class")
                }
            },
        }
    }

    fn perl_class_ranges(&self, c: char) -> Vec<(u32, u32)> {
        let (base, negated) = match c.to_ascii_lowercase() {
            'd' => (vec![('0' as u32, '9' as u32)], c.is_uppercase()),
            's' => (whitespace_ranges(), c.is_uppercase()),
            'w' => (word_ranges(), c.is_uppercase()),
            _ => unreachable!(),
        };
        if negated { class::complement(base) } else { base }
    }

    fn parse_unicode_class_ranges(&mut self) -> PResult<Vec<(u32, u32)>> {
        let negated = self.cur() == 'P';
        let name: String;
        if self.peek(1) == Some('{') {
            self.advance();
            let closer = match self.find_from(self.pos, '}') {
                Some(i) => i,
                None => return self.err(ErrorKind::InvalidCharClass, "unclosed '\\p{'"),
            };
            name = self.chars[self.pos + 1..closer].iter().collect();
            self.pos = closer;
        } else {
            if self.pos + 1 >= self.chars.len() {
                return self.err(ErrorKind::InvalidCharClass, "missing single-letter Unicode class name");
            }
            self.advance();
            name = self.cur().to_string();
        }
        let ranges = unicode::lookup_category(&name)
            .ok_or_else(|| self.make_err(ErrorKind::InvalidCharClass, format!("unknown Unicode class '{}'", name)))?
            .to_vec();
        Ok(if negated { class::complement(ranges) } else { ranges })
    }

    // ---- escapes outside character classes -------------------------------

    fn parse_escape(&mut self) -> PResult<Ast> {
        self.advance();
        if self.pos >= self.chars.len() {
            return self.err(ErrorKind::TrailingBackslash, "pattern ends with a backslash");
        }
        let c = self.cur();
        match c {
            'b' => Ok(Ast::Assertion(Assertion::WordBoundary)),
            'B' => Ok(Ast::Assertion(Assertion::NoWordBoundary)),
            'A' => Ok(Ast::Assertion(Assertion::BeginText)),
            'z' => Ok(Ast::Assertion(Assertion::EndText)),
            'd' | 'D' | 'w' | 'W' | 's' | 'S' => Ok(Ast::CharClass { ranges: self.perl_class_ranges(c), negated: false }),
            'p' | 'P' => {
                let ranges = self.parse_unicode_class_ranges()?;
                Ok(Ast::CharClass { ranges, negated: false })
            }
            'k' => self.parse_named_backreference(),
            '1'..='9' => self.parse_numeric_escape(),
            'c' => self.err(ErrorKind::InvalidEscape, "\\c is reserved"),
            _ => match self.parse_common_escape(c)? {
                CommonEscape::Literal(cp) => Ok(self.literal_class(cp)),
                CommonEscape::Assertion(a) => Ok(Ast::Assertion(a)),
            },
        }
    }

    /// Escapes shared between bracketed and unbracketed contexts: control
    /// characters, `\0`, `\u`, and "a meta character escaped to itself".
    fn parse_common_escape(&mut self, c: char) -> PResult<CommonEscape> {
        match c {
            't' => Ok(CommonEscape::Literal('\t' as u32)),
            'n' => Ok(CommonEscape::Literal('\n' as u32)),
            'v' => Ok(CommonEscape::Literal(0x0B)),
            'f' => Ok(CommonEscape::Literal(0x0C)),
            'r' => Ok(CommonEscape::Literal('\r' as u32)),
            'u' => Ok(CommonEscape::Literal(self.parse_unicode_escape()?)),
            '0' => {
                if matches!(self.peek(1), Some(d) if d.is_ascii_digit()) {
                    self.err(ErrorKind::InvalidEscape, "\\0 followed by a digit is not allowed")
                } else {
                    Ok(CommonEscape::Literal(0))
                }
            }
            _ if is_meta(c) => Ok(CommonEscape::Literal(c as u32)),
            _ => self.err(ErrorKind::InvalidEscape, format!("unrecognized escape sequence '\\{}'", c)),
        }
    }

    fn parse_unicode_escape(&mut self) -> PResult<u32> {
        if self.peek(1) == Some('{') {
            self.advance(); // at '{'
            let start = self.pos + 1;
            let closer = match self.find_from(self.pos, '}') {
                Some(i) => i,
                None => return self.err(ErrorKind::InvalidEscape, "unclosed '\\u{'"),
            };
            if closer == start {
                return self.err(ErrorKind::InvalidEscape, "empty '\\u{}' escape");
            }
            let hex: String = self.chars[start..closer].iter().collect();
            self.pos = closer;
            self.parse_hex_codepoint(&hex)
        } else {
            let start = self.pos + 1;
            let end = start + 4;
            if end > self.chars.len() {
                return self.err(ErrorKind::InvalidEscape, "incomplete '\\uHHHH' escape");
            }
            let hex: String = self.chars[start..end].iter().collect();
            self.pos = end - 1;
            self.parse_hex_codepoint(&hex)
        }
    }

    fn parse_hex_codepoint(&self, hex: &str) -> PResult<u32> {
        let n = u32::from_str_radix(hex, 16)
            .map_err(|_| self.make_err(ErrorKind::InvalidEscape, format!("'{}' is not valid hex", hex)))?;
        if n > class::MAX_CODEPOINT {
            return self.err(ErrorKind::InvalidEscape, format!("'\\u{{{:x}}}' exceeds U+10FFFF", n));
        }
        Ok(n)
    }

    fn parse_numeric_escape(&mut self) -> PResult<Ast> {
        let start = self.pos;
        while matches!(self.peek(1), Some(d) if d.is_ascii_digit()) {
            self.advance();
        }
        let digits: String = self.chars[start..=self.pos].iter().collect();
        let n: u32 = digits
            .parse()
            .map_err(|_| self.make_err(ErrorKind::InvalidEscape, format!("'{}' is not a valid backreference", digits)))?;
        self.validate_backreference(n)?;
        self.has_backreference = true;
        Ok(Ast::Backreference(n))
    }

    fn parse_named_backreference(&mut self) -> PResult<Ast> {
        if self.peek(1) != Some('<') {
            return self.err(ErrorKind::InvalidEscape, "\\k must be followed by '<name>'");
        }
        self.advance(); // at '<'
        let start = self.pos + 1;
        let closer = match self.find_from(self.pos, '>') {
            Some(i) => i,
            None => return self.err(ErrorKind::InvalidEscape, "\\k<name> is missing its closing '>'"),
        };
        let name: String = self.chars[start..closer].iter().collect();
        self.pos = closer;
        let idx = self
            .names
            .iter()
            .find(|(n, _)| n == &name)
            .map(|(_, i)| *i)
            .ok_or_else(|| self.make_err(ErrorKind::InvalidEscape, format!("undefined named group '{}'", name)))?;
        self.validate_backreference(idx)?;
        self.has_backreference = true;
        Ok(Ast::Backreference(idx))
    }

    fn validate_backreference(&self, idx: u32) -> PResult<()> {
        if idx == 0 || idx >= self.caps + 1 {
            return self.err(ErrorKind::InvalidEscape, format!("group {} does not exist", idx));
        }
        if self.open_captures.contains(&idx) {
            return self.err(ErrorKind::InvalidEscape, format!("group {} is not yet closed", idx));
        }
        Ok(())
    }

    // ---- low-level cursor helpers ----------------------------------------

    fn cur(&self) -> char {
        self.chars[self.pos]
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn find_from(&self, from: usize, target: char) -> Option<usize> {
        self.chars[from..].iter().position(|&c| c == target).map(|i| from + i)
    }

    fn err<T>(&self, kind: ErrorKind, msg: impl Into<String>) -> PResult<T> {
        Err(self.make_err(kind, msg))
    }

    fn make_err(&self, kind: ErrorKind, msg: impl Into<String>) -> Error {
        let fragment: String = self.chars[self.pos.min(self.chars.len())..].iter().collect();
        Error { pos: self.pos, kind, fragment, msg: msg.into() }
    }
}

enum ClassPiece {
    Literal(u32),
    Ranges(Vec<(u32, u32)>),
}

enum CommonEscape {
    Literal(u32),
    Assertion(Assertion),
}

pub(crate) fn is_meta(c: char) -> bool {
    matches!(c, '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$')
}

/// `\w` / `\W`: ASCII word characters.
fn word_ranges() -> Vec<(u32, u32)> {
    vec![('0' as u32, '9' as u32), ('A' as u32, 'Z' as u32), ('a' as u32, 'z' as u32), ('_' as u32, '_' as u32)]
}

/// `\s` / `\S`: ECMAScript WhiteSpace + LineTerminator.
fn whitespace_ranges() -> Vec<(u32, u32)> {
    class::simplify(vec![
        (0x09, 0x0D), // \t \n \v \f \r
        (0x20, 0x20), // space
        (0xA0, 0xA0), // NBSP
        (0x1680, 0x1680),
        (0x2000, 0x200A),
        (0x2028, 0x2029), // line/paragraph separator
        (0x202F, 0x202F),
        (0x205F, 0x205F),
        (0x3000, 0x3000),
        (0xFEFF, 0xFEFF), // BOM
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(p: &str) -> ParseResult {
        parse(p, "").unwrap_or_else(|e| panic!("expected {:?} to parse, got {}", p, e))
    }

    fn parse_err(p: &str) -> ErrorKind {
        parse(p, "").unwrap_err().kind
    }

    #[test]
    fn literal_concat() {
        let r = parse_ok("abc");
        assert!(matches!(r.ast, Ast::Concat(ref v) if v.len() == 3));
    }

    #[test]
    fn alternation_is_left_leaning() {
        let r = parse_ok("a|b|c");
        match r.ast {
            Ast::Alternate(_, right) => assert!(matches!(*right, Ast::Alternate(_, _))),
            other => panic!("expected Alternate, got {:?}", other),
        }
    }

    #[test]
    fn capture_numbering_and_names() {
        let r = parse_ok(r"(?<year>\d{4})-(?<month>\d{2})-(?<day>\d{2})");
        assert_eq!(r.capture_count, 4);
        assert_eq!(r.index_for_name("year"), Some(1));
        assert_eq!(r.index_for_name("month"), Some(2));
        assert_eq!(r.index_for_name("day"), Some(3));
    }

    #[test]
    fn duplicate_names_rejected() {
        assert_eq!(parse_err("(?<x>a)(?<x>b)"), ErrorKind::InvalidNamedCapture);
    }

    #[test]
    fn backreference_validity() {
        let r = parse_ok(r"(.)(.)\2\1");
        assert!(r.has_backreference);
        assert_eq!(parse_err(r"(\1)"), ErrorKind::InvalidEscape);
        assert_eq!(parse_err(r"\1"), ErrorKind::InvalidEscape);
    }

    #[test]
    fn unclosed_paren_is_missing_parenthesis() {
        assert_eq!(parse_err("a(bc"), ErrorKind::MissingParenthesis);
    }

    #[test]
    fn stray_close_paren_is_unexpected() {
        assert_eq!(parse_err("a)bc"), ErrorKind::UnexpectedParenthesis);
    }

    #[test]
    fn bad_repeat_size_is_rejected() {
        assert_eq!(parse_err("a{5,2}"), ErrorKind::InvalidRepeatSize);
    }

    #[test]
    fn unclosed_class_is_missing_bracket() {
        assert_eq!(parse_err("[abc"), ErrorKind::MissingBracket);
    }

    #[test]
    fn trailing_backslash_is_reported() {
        assert_eq!(parse_err("a\\"), ErrorKind::TrailingBackslash);
    }

    #[test]
    fn double_empty_class_parses_as_two_classes() {
        // Pinned open question: `[][]` is two classes (each containing just
        // `]`), not one class spanning both bracket pairs.
        let r = parse_ok("[][]");
        assert!(matches!(r.ast, Ast::Concat(ref v) if v.len() == 2));
    }
}
