//! Two execution strategies over a compiled [`Program`]:
//!
//! - [`run`] dispatches to a lockstep Thompson/Pike simulation
//!   (`run_lockstep`) for ordinary patterns, guaranteeing `O(program_len *
//!   input_len)` time via the generation-array thread dedup in [`Threads`].
//! - Patterns with a backreference (`Program::has_backreference`) fall back
//!   to `run_backtracking`, a plain depth-first backtracker. Backreferences
//!   make the language non-regular, so no amount of cleverness gets this
//!   case back to linear time — this path is opt-in and documented as
//!   potentially exponential.
//!
//! Both engines share one instruction set and, because the leftmost-first
//! unanchored-search preamble (see `compile::Program::compile`) is baked
//! into the program itself, neither needs the teacher's dynamic "inject a
//! new start thread every step unless already matched" logic in the main
//! loop — the preamble's own `Split`/`Char`/`Jump` loop reproduces that
//! behavior as ordinary epsilon transitions. The lockstep engine still has
//! to stop that self-perpetuating loop once a match is found (new attempts
//! at later positions can never be more leftmost-first than what's already
//! matched); `Nfa::add` special-cases instruction 0 for that.

use crate::ast::Assertion;
use crate::class;
use crate::compile::{Inst, Program};

/// A defensive bound on recursive calls in the backtracking engine, for
/// patterns whose backreferences would otherwise blow up on adversarial
/// input. Ordinary patterns never reach the backtracking engine at all.
const MAX_BACKTRACK_STEPS: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Only "did it match" is needed; capture slots are never tracked.
    Exists,
    /// Only the overall match's start/end (slots 0 and 1) are tracked.
    Location,
    /// Every capture group's start/end is tracked.
    Submatches,
}

pub type CaptureLocs = Vec<Option<usize>>;

/// Pairs up a flat `CaptureLocs` into `(start, end)` tuples, one per capture
/// group. Panics if a group has exactly one of its two slots filled — that
/// indicates a VM bug, since `Save` instructions always come in pairs.
pub fn unflatten(locs: &CaptureLocs) -> Vec<Option<(usize, usize)>> {
    locs.chunks(2)
        .map(|w| match (w[0], w[1]) {
            (Some(s), Some(e)) => Some((s, e)),
            (None, None) => None,
            _ => unreachable!("BUG: unpaired capture slots: {:?}", w),
        })
        .collect()
}

/// Executes `prog` against `input[start..end]` (as code-point indices, not
/// byte offsets — the crate decodes the subject string into a `Vec<char>`
/// once up front and every position downstream is an index into that,
/// matching the Rust-idiomatic representation rather than the UTF-16
/// code-unit counting an ECMAScript engine would use).
pub fn run(which: MatchKind, prog: &Program, input: &[char], start: usize, end: usize) -> CaptureLocs {
    if prog.has_backreference {
        run_backtracking(which, prog, input, start, end)
    } else {
        run_lockstep(which, prog, input, start, end)
    }
}

// ---- lockstep Thompson/Pike simulation ----------------------------------

fn run_lockstep(which: MatchKind, prog: &Program, input: &[char], start: usize, end: usize) -> CaptureLocs {
    let num_caps = match which {
        MatchKind::Exists => 0,
        MatchKind::Location => 1,
        MatchKind::Submatches => prog.capture_count as usize,
    };
    let slots = num_caps * 2;

    let nfa = Nfa { insts: &prog.insts, input, which };
    let mut clist = Threads::new(prog.insts.len(), slots);
    let mut nlist = Threads::new(prog.insts.len(), slots);
    let mut groups: CaptureLocs = vec![None; slots];
    let mut matched = false;

    let mut seed = vec![None; slots];
    nfa.add(&mut clist, 0, start, &mut seed, matched);

    let mut pos = start;
    loop {
        if clist.size == 0 {
            break;
        }
        let c = if pos < end { Some(input[pos]) } else { None };

        let mut i = 0;
        while i < clist.size {
            let pc = clist.pc(i);
            match &nfa.insts[pc] {
                Inst::Matched => {
                    if let MatchKind::Exists = which {
                        return vec![Some(0), Some(0)];
                    }
                    groups.copy_from_slice(clist.caps(i));
                    matched = true;
                    break;
                }
                Inst::Char { ranges, negated } => {
                    if let Some(ch) = c {
                        if class::contains(ranges, ch as u32) != *negated {
                            let mut caps = clist.caps(i).clone();
                            nfa.add(&mut nlist, pc + 1, pos + 1, &mut caps, matched);
                        }
                    }
                }
                _ => {} // epsilon instructions were already resolved in `add`
            }
            i += 1;
        }

        std::mem::swap(&mut clist, &mut nlist);
        nlist.clear();
        if pos >= end {
            break;
        }
        pos += 1;
    }

    match which {
        MatchKind::Exists => vec![if matched { Some(0) } else { None }; 2],
        MatchKind::Location | MatchKind::Submatches => groups,
    }
}

struct Nfa<'p> {
    insts: &'p [Inst],
    input: &'p [char],
    which: MatchKind,
}

impl<'p> Nfa<'p> {
    /// Epsilon-closure from `pc`: follows `Jump`/`Split`/`Save`/`Assertion`
    /// until it reaches a `Char` or `Matched` instruction (or dies on a
    /// failed assertion), adding every instruction it visits to `list` so a
    /// second visit in the same step is a no-op (this is what keeps the
    /// whole simulation to `O(program_len)` per step).
    fn add(&self, list: &mut Threads, pc: usize, pos: usize, caps: &mut CaptureLocs, matched: bool) {
        if list.contains(pc) {
            return;
        }
        // Instruction 0 is always the search preamble's `Split` (see
        // `compile::Program::compile`). Once a match has been found, new
        // threads spawned from here would start later in the input and can
        // never be more leftmost than what already matched, so stop feeding
        // the self-perpetuating ".*?" loop.
        if pc == 0 && matched {
            list.mark(pc);
            return;
        }
        match &self.insts[pc] {
            Inst::Jump(to) => {
                list.mark(pc);
                self.add(list, *to, pos, caps, matched);
            }
            Inst::Split(x, y) => {
                list.mark(pc);
                self.add(list, *x, pos, caps, matched);
                self.add(list, *y, pos, caps, matched);
            }
            Inst::Save(slot) => {
                list.mark(pc);
                if self.tracks_slot(*slot) {
                    let old = caps[*slot];
                    caps[*slot] = Some(pos);
                    self.add(list, pc + 1, pos, caps, matched);
                    caps[*slot] = old;
                } else {
                    self.add(list, pc + 1, pos, caps, matched);
                }
            }
            Inst::Assertion(a) => {
                list.mark(pc);
                if assertion_holds(*a, self.input, pos) {
                    self.add(list, pc + 1, pos, caps, matched);
                }
            }
            Inst::Char { .. } | Inst::Matched => {
                list.add(pc, Some(caps));
            }
            Inst::Backreference(_) => {
                unreachable!("lockstep VM never runs a program with a backreference")
            }
        }
    }

    fn tracks_slot(&self, slot: usize) -> bool {
        match self.which {
            MatchKind::Exists => false,
            MatchKind::Location => slot <= 1,
            MatchKind::Submatches => true,
        }
    }
}

struct Thread {
    pc: usize,
    caps: CaptureLocs,
}

/// A sparse-set backed thread list: `O(1)` membership test and insertion,
/// reused across the whole run so there's no allocation once execution
/// starts (see http://research.swtch.com/sparse for the underlying trick).
struct Threads {
    queue: Vec<Thread>,
    sparse: Vec<usize>,
    size: usize,
}

impl Threads {
    fn new(num_insts: usize, slots: usize) -> Threads {
        Threads {
            queue: (0..num_insts).map(|_| Thread { pc: usize::MAX, caps: vec![None; slots] }).collect(),
            sparse: vec![0; num_insts],
            size: 0,
        }
    }

    /// Marks `pc` as visited without recording capture state (used for
    /// epsilon instructions, which are never read back by the outer loop).
    fn mark(&mut self, pc: usize) {
        let idx = self.size;
        self.queue[idx].pc = pc;
        self.sparse[pc] = idx;
        self.size += 1;
    }

    /// Adds `pc` as a "real" (`Char`/`Matched`) thread, snapshotting `caps`.
    fn add(&mut self, pc: usize, caps: Option<&CaptureLocs>) {
        let idx = self.size;
        self.queue[idx].pc = pc;
        if let Some(c) = caps {
            self.queue[idx].caps.clone_from_slice(c);
        }
        self.sparse[pc] = idx;
        self.size += 1;
    }

    fn contains(&self, pc: usize) -> bool {
        let s = self.sparse[pc];
        s < self.size && self.queue[s].pc == pc
    }

    fn clear(&mut self) {
        self.size = 0;
    }

    fn pc(&self, i: usize) -> usize {
        self.queue[i].pc
    }

    fn caps(&self, i: usize) -> &CaptureLocs {
        &self.queue[i].caps
    }
}

fn assertion_holds(a: Assertion, input: &[char], pos: usize) -> bool {
    let len = input.len();
    match a {
        Assertion::BeginText => pos == 0,
        Assertion::EndText => pos == len,
        Assertion::BeginLine => pos == 0 || input[pos - 1] == '\n',
        Assertion::EndLine => pos == len || input[pos] == '\n',
        Assertion::WordBoundary => is_word_at(input, pos.wrapping_sub(1), pos > 0) != is_word_at(input, pos, pos < len),
        Assertion::NoWordBoundary => {
            is_word_at(input, pos.wrapping_sub(1), pos > 0) == is_word_at(input, pos, pos < len)
        }
    }
}

fn is_word_at(input: &[char], idx: usize, in_bounds: bool) -> bool {
    in_bounds && is_word_char(input[idx])
}

/// ASCII-only, matching the rest of this crate's ASCII `\w` semantics.
fn is_word_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

// ---- backtracking fallback (backreferences) ------------------------------

fn run_backtracking(which: MatchKind, prog: &Program, input: &[char], start: usize, end: usize) -> CaptureLocs {
    let slots = prog.capture_count as usize * 2;
    let mut caps: CaptureLocs = vec![None; slots];
    let mut steps = 0u64;
    let matched = Backtracker { insts: &prog.insts, input }.attempt(0, start, &mut caps, &mut steps);

    match which {
        MatchKind::Exists => vec![if matched { Some(0) } else { None }; 2],
        MatchKind::Location => {
            if matched {
                vec![caps[0], caps[1]]
            } else {
                vec![None, None]
            }
        }
        MatchKind::Submatches => {
            if matched {
                caps
            } else {
                vec![None; slots]
            }
        }
    }
    .into_iter()
    .take(match which {
        MatchKind::Exists => 2,
        MatchKind::Location => 2,
        MatchKind::Submatches => slots,
    })
    .collect()
}

struct Backtracker<'p> {
    insts: &'p [Inst],
    input: &'p [char],
}

impl<'p> Backtracker<'p> {
    /// Depth-first search, always exploring the higher-priority branch of a
    /// `Split` first. Because of that ordering, the first full match this
    /// finds is automatically the leftmost-first, highest-priority one — no
    /// need to keep searching for a "better" match once one is found, unlike
    /// the lockstep engine's breadth-first simulation.
    fn attempt(&self, pc: usize, pos: usize, caps: &mut CaptureLocs, steps: &mut u64) -> bool {
        *steps += 1;
        if *steps > MAX_BACKTRACK_STEPS {
            return false;
        }
        match &self.insts[pc] {
            Inst::Matched => true,
            Inst::Jump(to) => self.attempt(*to, pos, caps, steps),
            Inst::Split(x, y) => {
                let snapshot = caps.clone();
                if self.attempt(*x, pos, caps, steps) {
                    return true;
                }
                *caps = snapshot;
                self.attempt(*y, pos, caps, steps)
            }
            Inst::Save(slot) => {
                let old = caps[*slot];
                caps[*slot] = Some(pos);
                if self.attempt(pc + 1, pos, caps, steps) {
                    true
                } else {
                    caps[*slot] = old;
                    false
                }
            }
            Inst::Assertion(a) => assertion_holds(*a, self.input, pos) && self.attempt(pc + 1, pos, caps, steps),
            Inst::Char { ranges, negated } => {
                pos < self.input.len()
                    && (class::contains(ranges, self.input[pos] as u32) != *negated)
                    && self.attempt(pc + 1, pos + 1, caps, steps)
            }
            Inst::Backreference(group) => {
                let slot = 2 * *group as usize;
                match (caps[slot], caps[slot + 1]) {
                    (Some(s), Some(e)) => {
                        let len = e - s;
                        if pos + len > self.input.len() || self.input[pos..pos + len] != self.input[s..e] {
                            return false;
                        }
                        self.attempt(pc + 1, pos + len, caps, steps)
                    }
                    // A group that never participated can't be backreferenced.
                    _ => false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Program;
    use crate::parse;

    fn run_submatches(pattern: &str, haystack: &str) -> Vec<Option<(usize, usize)>> {
        let parsed = parse::parse(pattern, "").unwrap();
        let prog = Program::compile(&parsed);
        let chars: Vec<char> = haystack.chars().collect();
        let locs = run(MatchKind::Submatches, &prog, &chars, 0, chars.len());
        unflatten(&locs)
    }

    #[test]
    fn finds_leftmost_alternative() {
        let caps = run_submatches("a(bc|de)f", "xxabcf");
        assert_eq!(caps[0], Some((2, 6)));
        assert_eq!(caps[1], Some((3, 5)));
    }

    #[test]
    fn lazy_quantifier_matches_minimally() {
        // `a+?` can never contribute zero characters, so `(a+?)aaaa` needs 5
        // `a`s against a 4-`a` input and can't match at all; `a*?` is the
        // lazy operator that can, which is what makes group 1 come back
        // empty while group 0 still covers the whole input.
        let caps = run_submatches("(a*?)aaaa", "aaaa");
        assert_eq!(caps[1], Some((0, 0)));
    }

    #[test]
    fn greedy_quantifier_matches_maximally() {
        let caps = run_submatches("(a+)", "aaaa");
        assert_eq!(caps[1], Some((0, 4)));
    }

    #[test]
    fn backreference_requires_equal_text() {
        let caps = run_submatches(r"(.)(.)\2\1", "abba");
        assert_eq!(caps[0], Some((0, 4)));
        let none = run_submatches(r"(.)(.)\2\1", "abab");
        assert_eq!(none[0], None);
    }

    #[test]
    fn word_boundary_assertions() {
        let caps = run_submatches(r"\bcat\b", "a cat sat");
        assert_eq!(caps[0], Some((2, 5)));
    }

    #[test]
    fn no_match_returns_none() {
        let caps = run_submatches("xyz", "abc");
        assert_eq!(caps[0], None);
    }
}
