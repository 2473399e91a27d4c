use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer paired with its rendered name. Produced by
/// [`crate::NameFormat::named`] and friends; compares equal to either half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedNumber {
    value: u64,
    name: String,
}

impl NamedNumber {
    pub(crate) fn new(value: u64, name: String) -> Self {
        Self { value, name }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NamedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<NamedNumber> for u64 {
    fn from(n: NamedNumber) -> u64 {
        n.value
    }
}

impl PartialEq<u64> for NamedNumber {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl PartialEq<str> for NamedNumber {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for NamedNumber {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}
