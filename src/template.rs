// Template interpretation: turns "%adjective% %animal%" into slots, radices
// and the anchored pattern the reverse parser matches against.

use regex::Regex;

use crate::error::{Error, Result};
use crate::options::{Alphabet, AlphabetResolver};

/// Marker syntax: `%name%` or `%name#count%`.
const MARKER_PATTERN: &str = "%([A-Za-z0-9][A-Za-z0-9_-]*)(?:#([0-9]+))?%";

/// Shape of a single word capture in the matching pattern. Word lists are
/// not disjoint by character class, so membership is validated against the
/// alphabet after capture, not by the group itself.
const WORD_PATTERN: &str = "[A-Za-z0-9][A-Za-z0-9_-]*?";

/// Expanded templates are capped so a runaway `#count` cannot balloon the
/// slot list or the capture count of the matching pattern.
const MAX_SLOTS: usize = 256;

#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub name: String,
    pub alphabet: Alphabet,
}

/// Template text split into render units; each slot piece indexes into
/// `Template::slots` and corresponds to one capture group of `pattern`.
#[derive(Debug, Clone)]
pub(crate) enum Piece {
    Literal(String),
    Slot(usize),
}

#[derive(Debug)]
pub(crate) struct Template {
    pub text: String,
    pub pieces: Vec<Piece>,
    pub slots: Vec<Slot>,
    pub radices: Vec<u64>,
    pub capacity: u64,
    pub pattern: Regex,
}

/// Interpret a template against an alphabet store. Runs once per format
/// construction; everything it returns is immutable afterwards.
pub(crate) fn interpret(fmt: &str, options: &dyn AlphabetResolver) -> Result<Template> {
    let marker = Regex::new(MARKER_PATTERN).expect("marker pattern is valid");

    let mut pieces = Vec::new();
    let mut slots: Vec<Slot> = Vec::new();
    let mut cursor = 0;

    for caps in marker.captures_iter(fmt) {
        let whole = caps.get(0).expect("group 0 always present");
        if whole.start() > cursor {
            pieces.push(Piece::Literal(fmt[cursor..whole.start()].to_string()));
        }
        cursor = whole.end();

        let name = &caps[1];
        let count: usize = match caps.get(2) {
            Some(c) => c.as_str().parse().map_err(|_| Error::BadRepeatCount {
                name: name.to_string(),
                count: c.as_str().to_string(),
            })?,
            None => 1,
        };
        if count == 0 {
            return Err(Error::BadRepeatCount { name: name.to_string(), count: "0".to_string() });
        }
        if slots.len() + count > MAX_SLOTS {
            return Err(Error::TooManySlots { count: slots.len() + count, limit: MAX_SLOTS });
        }

        // A bare numeric name denotes the implicit counting alphabet of
        // that size, not a store lookup.
        let alphabet = match name.parse::<u64>() {
            Ok(n) => Alphabet::Counting(n),
            Err(_) => options
                .alphabet(name)
                .ok_or_else(|| Error::NoSuchGroup(name.to_string()))?,
        };
        if alphabet.is_empty() {
            return Err(Error::EmptyAlphabet(name.to_string()));
        }

        // A repeated marker draws `count` independent symbols from the
        // same alphabet.
        for _ in 0..count {
            pieces.push(Piece::Slot(slots.len()));
            slots.push(Slot { name: name.to_string(), alphabet: alphabet.clone() });
        }
    }
    if cursor < fmt.len() {
        pieces.push(Piece::Literal(fmt[cursor..].to_string()));
    }

    let radices: Vec<u64> = slots.iter().map(|s| s.alphabet.len()).collect();
    let capacity = radices
        .iter()
        .try_fold(1u64, |acc, &r| acc.checked_mul(r))
        .ok_or_else(|| Error::CapacityOverflow(fmt.to_string()))?;

    let pattern = build_pattern(&pieces, &slots)?;

    log::debug!(
        "interpreted template {:?}: {} slots, radices {:?}, capacity {}",
        fmt,
        slots.len(),
        radices,
        capacity
    );

    Ok(Template { text: fmt.to_string(), pieces, slots, radices, capacity, pattern })
}

/// Anchored full-match pattern with one capture group per slot. Literal
/// segments are escaped so `.` or `(` in template text stay literal.
fn build_pattern(pieces: &[Piece], slots: &[Slot]) -> Result<Regex> {
    let mut pattern = String::from("^");
    for piece in pieces {
        match piece {
            Piece::Literal(text) => pattern.push_str(&regex::escape(text)),
            Piece::Slot(i) => match &slots[*i].alphabet {
                Alphabet::Words(_) => {
                    pattern.push('(');
                    pattern.push_str(WORD_PATTERN);
                    pattern.push(')');
                }
                Alphabet::Charset(chars) => {
                    pattern.push_str(&format!("([{}])", regex::escape(chars)));
                }
                Alphabet::Counting(_) => pattern.push_str("([0-9]+)"),
            },
        }
    }
    pattern.push('$');
    Ok(Regex::new(&pattern)?)
}

impl Template {
    /// Substitute one symbol per slot, in template order. `digits` comes
    /// from radix decomposition, so every digit is within its radix.
    pub fn render(&self, digits: &[u64]) -> String {
        let mut out = String::with_capacity(self.text.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Slot(i) => {
                    let symbol = self.slots[*i]
                        .alphabet
                        .value_at(digits[*i])
                        .expect("digit within radix");
                    out.push_str(&symbol);
                }
            }
        }
        out
    }

    /// Match a rendered name and map each captured token back to its digit.
    pub fn parse(&self, name: &str) -> Result<Vec<u64>> {
        let caps = self
            .pattern
            .captures(name)
            .ok_or_else(|| Error::NameMismatch(name.to_string()))?;
        let mut digits = Vec::with_capacity(self.slots.len());
        for (i, slot) in self.slots.iter().enumerate() {
            let token = caps
                .get(i + 1)
                .map(|m| m.as_str())
                .unwrap_or_default();
            let digit = slot.alphabet.index_of(token).ok_or_else(|| Error::NotInAlphabet {
                slot: slot.name.clone(),
                token: token.to_string(),
            })?;
            digits.push(digit);
        }
        Ok(digits)
    }
}
