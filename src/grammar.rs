//! Grammar storage and string rewriting.
//!
//! [`GrammarEngine`] parses a line-oriented program (see [`GrammarEngine::load_program_from_string`])
//! into an axiom and a table of single-symbol production rules, then rewrites the axiom on demand.
//! Every depth that has been computed is kept, so asking for a depth at or below the deepest one
//! seen so far is a lookup, and asking for a deeper one continues from the last cached string.

use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Default turn angle in degrees when a program does not set one.
pub const DEFAULT_ANGLE: f32 = 22.5;

/// Default forward step when a program does not set one.
pub const DEFAULT_STEP: f32 = 1.0;

/// A parsed program line.
#[derive(Clone, Debug, PartialEq)]
enum Directive {
    Angle(f32),
    Step(f32),
    Axiom(String),
    Production(char, String),
}

/// Owns the production table, the axiom, and the per-depth iteration cache.
#[derive(Clone, Debug)]
pub struct GrammarEngine {
    productions: HashMap<char, String>,
    /// `iterations[i]` is the axiom rewritten `i` times. Never empty: entry 0 is the axiom.
    iterations: Vec<String>,
    default_angle: f32,
    default_step: f32,
    source: String,
    rewrites: usize,
    /// Set once a rewrite reproduced the last cached string: every deeper depth equals it.
    settled: bool,
}

impl Default for GrammarEngine {
    fn default() -> Self {
        Self {
            productions: HashMap::new(),
            iterations: vec![String::new()],
            default_angle: DEFAULT_ANGLE,
            default_step: DEFAULT_STEP,
            source: String::new(),
            rewrites: 0,
            settled: false,
        }
    }
}

impl GrammarEngine {
    /// Creates an engine with no axiom, no rules and the default angle and step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole grammar with the one described by `program`.
    ///
    /// Recognized lines (each trimmed, split at whichever of `=` or `->` comes first):
    ///
    /// | Line | Effect |
    /// |---|---|
    /// | `angle = 25` | default turn angle, degrees |
    /// | `step = 0.5` | default forward step |
    /// | `axiom = F` | depth-0 string |
    /// | `F = F[+F]F` or `F -> F[+F]F` | production rule, last definition wins |
    ///
    /// Blank lines, `#` comments and anything else are skipped. Loading never fails: a garbage
    /// program simply leaves an engine with no axiom and no rules.
    pub fn load_program_from_string(&mut self, program: &str) {
        self.reset();
        self.source = program.to_string();

        for (line_no, line) in program.lines().enumerate() {
            match parse_line(line) {
                Some(Directive::Angle(a)) => self.default_angle = a,
                Some(Directive::Step(s)) => self.default_step = s,
                Some(Directive::Axiom(axiom)) => self.iterations[0] = axiom,
                Some(Directive::Production(sym, successor)) => {
                    self.productions.insert(sym, successor);
                }
                None => {
                    if !is_blank_or_comment(line) {
                        debug!(line = line_no + 1, text = %line.trim(), "skipping unrecognized program line");
                    }
                }
            }
        }

        debug!(
            axiom = %self.iterations[0],
            rules = self.productions.len(),
            angle = self.default_angle,
            step = self.default_step,
            "loaded L-System program"
        );
    }

    /// Parses a single rule line (`X = successor` or `X -> successor`) and inserts it,
    /// overwriting any previous rule for the same symbol.
    ///
    /// Returns `false` if the line is not a production rule. Adding a rule discards cached
    /// depths beyond the axiom, since they were derived from the old table.
    pub fn add_production(&mut self, line: &str) -> bool {
        match parse_line(line) {
            Some(Directive::Production(sym, successor)) => {
                self.productions.insert(sym, successor);
                self.iterations.truncate(1);
                self.settled = false;
                true
            }
            _ => {
                debug!(text = %line.trim(), "ignoring malformed production");
                false
            }
        }
    }

    /// Returns the axiom rewritten `n` times.
    ///
    /// Missing depths are computed from the deepest cached one and stored. Once a rewrite
    /// leaves the string unchanged the cache stops growing, and any deeper request is answered
    /// with the last cached string.
    pub fn get_iteration(&mut self, n: usize) -> &str {
        if n >= self.iterations.len() && !self.settled {
            debug!(from = self.iterations.len() - 1, to = n, "extending iteration cache");
        }
        while !self.settled && self.iterations.len() <= n {
            let last = &self.iterations[self.iterations.len() - 1];
            let next = self.rewrite(last);
            self.rewrites += 1;
            if next == *last {
                debug!(depth = self.iterations.len() - 1, "iteration reached a fixed point");
                self.settled = true;
                break;
            }
            trace!(depth = self.iterations.len(), len = next.len(), "rewrote iteration");
            self.iterations.push(next);
        }
        let depth = n.min(self.iterations.len() - 1);
        &self.iterations[depth]
    }

    /// Applies every production once, left to right. Symbols with no rule copy through.
    fn rewrite(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len() * 2);
        for c in input.chars() {
            match self.productions.get(&c) {
                Some(successor) => out.push_str(successor),
                None => out.push(c),
            }
        }
        out
    }

    /// The depth-0 string, empty if the program declared none.
    pub fn axiom(&self) -> &str {
        &self.iterations[0]
    }

    /// The successor for `symbol`, `None` if it is a terminal.
    pub fn production(&self, symbol: char) -> Option<&str> {
        self.productions.get(&symbol).map(String::as_str)
    }

    /// All rules, in no particular order.
    pub fn productions(&self) -> impl Iterator<Item = (char, &str)> {
        self.productions.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Turn angle in degrees.
    pub fn default_angle(&self) -> f32 {
        self.default_angle
    }

    /// Forward step length.
    pub fn default_step(&self) -> f32 {
        self.default_step
    }

    /// Overrides the turn angle (degrees). Cached iterations are unaffected.
    pub fn set_default_angle(&mut self, degrees: f32) {
        self.default_angle = degrees;
    }

    /// Overrides the forward step. Cached iterations are unaffected.
    pub fn set_default_step(&mut self, distance: f32) {
        self.default_step = distance;
    }

    /// The raw program text last passed to [`load_program_from_string`](Self::load_program_from_string).
    pub fn grammar_string(&self) -> &str {
        &self.source
    }

    /// Number of depths currently cached (always at least 1).
    ///
    /// Stops growing once the grammar reaches a fixed point.
    pub fn cached_depth(&self) -> usize {
        self.iterations.len()
    }

    /// Number of rewriting passes performed since the last load.
    pub fn rewrite_count(&self) -> usize {
        self.rewrites
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

fn parse_line(line: &str) -> Option<Directive> {
    if is_blank_or_comment(line) {
        return None;
    }
    let line = line.trim();
    let (lhs, rhs) = split_directive(line)?;
    let (lhs, rhs) = (lhs.trim(), rhs.trim());

    match lhs.to_ascii_lowercase().as_str() {
        "angle" => parse_number(lhs, rhs).map(Directive::Angle),
        "step" => parse_number(lhs, rhs).map(Directive::Step),
        "axiom" => Some(Directive::Axiom(rhs.to_string())),
        _ => {
            let mut chars = lhs.chars();
            match (chars.next(), chars.next()) {
                (Some(sym), None) => Some(Directive::Production(sym, rhs.to_string())),
                _ => None,
            }
        }
    }
}

/// Splits at whichever of `=` / `->` comes first, so successors may contain the other one.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    match (line.find('='), line.find("->")) {
        (Some(eq), Some(arrow)) if arrow < eq => Some((&line[..arrow], &line[arrow + 2..])),
        (Some(eq), _) => Some((&line[..eq], &line[eq + 1..])),
        (None, Some(arrow)) => Some((&line[..arrow], &line[arrow + 2..])),
        (None, None) => None,
    }
}

fn parse_number(key: &str, value: &str) -> Option<f32> {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!(key, value, "ignoring non-numeric directive");
            None
        }
    }
}
