// Alphabet storage: the ordered symbol sets that template slots draw from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

// Kept as simple static slices (no extra crates needed).
static ADJECTIVES: &[&str] = &[
    "brave", "calm", "eager", "fancy", "gentle", "happy", "jolly", "kind",
    "lively", "merry", "nimble", "proud", "quick", "quiet", "rapid", "sharp",
    "shiny", "silly", "smooth", "solid", "spry", "steady", "sturdy", "sunny",
    "swift", "tidy", "tough", "vivid", "warm", "wise", "witty", "zesty",
];

static ANIMALS: &[&str] = &[
    "badger", "beaver", "bison", "condor", "crane", "dingo", "falcon", "ferret",
    "gecko", "heron", "ibex", "jackal", "lemur", "lynx", "macaw", "marmot",
    "marten", "mole", "newt", "ocelot", "osprey", "otter", "panda", "puffin",
    "quokka", "raven", "shrew", "stoat", "tapir", "toucan", "walrus", "wombat",
];

static COLORS: &[&str] = &[
    "amber", "azure", "coral", "crimson", "emerald", "golden", "indigo", "ivory",
    "jade", "magenta", "maroon", "olive", "scarlet", "silver", "teal", "violet",
];

static LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// One slot's symbol set. Symbol order is significant: the position of a
/// symbol is the digit value it encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Alphabet {
    /// Ordered list of words; one captured token per slot.
    Words(Vec<String>),
    /// Ordered character set; one character per slot.
    Charset(String),
    /// The implicit `{0 .. n-1}` decimal alphabet of a bare numeric slot
    /// name such as `%99%`.
    Counting(u64),
}

impl Alphabet {
    pub fn words(words: &[&str]) -> Self {
        Alphabet::Words(words.iter().map(|w| w.to_string()).collect())
    }

    /// Number of symbols; this is the slot's radix.
    pub fn len(&self) -> u64 {
        match self {
            Alphabet::Words(words) => words.len() as u64,
            Alphabet::Charset(chars) => chars.chars().count() as u64,
            Alphabet::Counting(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbol at a digit position. `None` when out of range.
    pub fn value_at(&self, index: u64) -> Option<String> {
        match self {
            Alphabet::Words(words) => words.get(index as usize).cloned(),
            Alphabet::Charset(chars) => {
                chars.chars().nth(index as usize).map(|c| c.to_string())
            }
            Alphabet::Counting(n) => (index < *n).then(|| index.to_string()),
        }
    }

    /// Digit position of a rendered symbol. `None` when the symbol is not
    /// in the alphabet. Duplicate words resolve to the first position.
    pub fn index_of(&self, symbol: &str) -> Option<u64> {
        match self {
            Alphabet::Words(words) => {
                words.iter().position(|w| w == symbol).map(|i| i as u64)
            }
            Alphabet::Charset(chars) => {
                let mut cs = symbol.chars();
                let (c, rest) = (cs.next()?, cs.next());
                if rest.is_some() {
                    return None;
                }
                chars.chars().position(|x| x == c).map(|i| i as u64)
            }
            Alphabet::Counting(n) => {
                let value: u64 = symbol.parse().ok()?;
                // Reject non-canonical spellings like "007": they would
                // parse to an integer that renders differently.
                (value < *n && symbol == value.to_string()).then_some(value)
            }
        }
    }
}

/// Maps a slot name to its alphabet. The template interpreter depends only
/// on this trait, not on any concrete store.
pub trait AlphabetResolver {
    fn alphabet(&self, name: &str) -> Option<Alphabet>;
}

/// The default store: built-in word lists with per-format overrides layered
/// on top. Only the overrides are serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Options {
    #[serde(flatten)]
    groups: HashMap<String, Alphabet>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace an alphabet under a slot name.
    pub fn insert(&mut self, name: impl Into<String>, alphabet: Alphabet) {
        self.groups.insert(name.into(), alphabet);
    }

    pub fn update(&mut self, groups: HashMap<String, Alphabet>) {
        self.groups.extend(groups);
    }

    pub fn load_from_disk(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let options = serde_json::from_str(&data)?;
        Ok(options)
    }

    pub fn save_to_disk(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn builtin(name: &str) -> Option<Alphabet> {
        match name {
            "adjective" => Some(Alphabet::words(ADJECTIVES)),
            "animal" => Some(Alphabet::words(ANIMALS)),
            "color" => Some(Alphabet::words(COLORS)),
            "letter" => Some(Alphabet::Charset(LETTERS.to_string())),
            _ => None,
        }
    }
}

impl AlphabetResolver for Options {
    fn alphabet(&self, name: &str) -> Option<Alphabet> {
        self.groups.get(name).cloned().or_else(|| Self::builtin(name))
    }
}
