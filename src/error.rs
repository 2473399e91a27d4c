use thiserror::Error;

/// Failures surfaced by the codec. The first group can only occur while
/// building a [`crate::NameFormat`], the rest while rendering or parsing.
#[derive(Debug, Error)]
pub enum Error {
    // === Configuration (construction-time) ===
    #[error("no alphabet registered for slot \"{0}\"")]
    NoSuchGroup(String),

    #[error("alphabet for slot \"{0}\" is empty")]
    EmptyAlphabet(String),

    #[error("repeat count \"{count}\" in marker \"%{name}#{count}%\" must be a positive integer")]
    BadRepeatCount { name: String, count: String },

    #[error("capacity of template \"{0}\" overflows u64")]
    CapacityOverflow(String),

    #[error("template expands to {count} slots, more than the supported {limit}")]
    TooManySlots { count: usize, limit: usize },

    #[error("failed to compile the matching pattern")]
    Pattern(#[from] regex::Error),

    #[error("byte order ranks have {got} entries but the template has {slots} slots")]
    BadByteOrder { got: usize, slots: usize },

    #[error("unknown byte order \"{0}\" (expected \"little\" or \"big\")")]
    UnknownByteOrder(String),

    #[error("capacity {capacity} exceeds the permutation cipher ceiling of {limit}")]
    PermutationTooLarge { capacity: u64, limit: u64 },

    #[error("failed to read or write an options file")]
    Io(#[from] std::io::Error),

    #[error("malformed options JSON")]
    Json(#[from] serde_json::Error),

    // === Range ===
    #[error("integer {value} out of range [0, {max}]")]
    OutOfRange { value: u64, max: u64 },

    // === Parse ===
    #[error("name \"{0}\" does not match the template")]
    NameMismatch(String),

    #[error("token \"{token}\" is not in the alphabet of slot \"{slot}\"")]
    NotInAlphabet { slot: String, token: String },
}

pub type Result<T> = std::result::Result<T, Error>;
