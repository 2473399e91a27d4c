// Nominal - reversible codec between integers and human-readable names
// Licensed under MIT License

//! Deterministic, bijective codec between non-negative integers and
//! memorable multi-word names, driven by a template of named slots.
//!
//! ```
//! use nominal::NameFormat;
//!
//! let fmt = NameFormat::new("%adjective%-%animal%")?;
//! let name = fmt.name_from_int(72)?;
//! assert_eq!(fmt.int_from_name(&name)?, 72);
//! # Ok::<(), nominal::Error>(())
//! ```
//!
//! Sequential integers normally differ only in the fastest-moving slot.
//! When that leaks more ordering than wanted, the permutation cipher
//! relabels the whole integer range (reproducibly, given a seed):
//!
//! ```
//! use nominal::NameFormat;
//!
//! let fmt = NameFormat::builder()
//!     .template("%adjective% %animal% %99%")
//!     .seed(12345)
//!     .randomized()
//!     .build()?;
//! let name = fmt.name_from_int(7)?;
//! assert_eq!(fmt.int_from_name(&name)?, 7);
//! # Ok::<(), nominal::Error>(())
//! ```

mod cipher;
mod error;
mod format;
mod named;
mod options;
mod radix;
mod template;

pub use cipher::MAX_PERMUTATION_CAPACITY;
pub use error::{Error, Result};
pub use format::{NameFormat, NameFormatBuilder, DEFAULT_TEMPLATE};
pub use named::NamedNumber;
pub use options::{Alphabet, AlphabetResolver, Options};
pub use radix::ByteOrder;
