// Nominal - reversible codec between integers and human-readable names
// Licensed under MIT License

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

use crate::cipher::Cipher;
use crate::error::{Error, Result};
use crate::named::NamedNumber;
use crate::options::{Alphabet, Options};
use crate::radix::{self, ByteOrder};
use crate::template::{self, Template};

pub const DEFAULT_TEMPLATE: &str = "%adjective% %animal%";

/// A compiled name template. Construction interprets the template once;
/// everything except the sampler's generator cursor is immutable afterwards.
///
/// Rendering and parsing are exact inverses: for every `i` in
/// `[0, capacity)`, `int_from_name(&name_from_int(i)?)? == i`.
pub struct NameFormat {
    template: Template,
    significance: Vec<usize>,
    byte_order: ByteOrder,
    cipher: Cipher,
    rng: Option<Mutex<StdRng>>,
}

impl NameFormat {
    /// Compile a template against the built-in alphabets.
    pub fn new(fmt: &str) -> Result<Self> {
        Self::builder().template(fmt).build()
    }

    pub fn builder() -> NameFormatBuilder {
        NameFormatBuilder::default()
    }

    /// Total number of distinct representable integers.
    pub fn capacity(&self) -> u64 {
        self.template.capacity
    }

    /// Largest renderable integer, `capacity - 1`.
    pub fn max_number(&self) -> u64 {
        self.template.capacity - 1
    }

    pub fn template(&self) -> &str {
        &self.template.text
    }

    /// Render an integer as a name.
    pub fn name_from_int(&self, i: u64) -> Result<String> {
        if i >= self.capacity() {
            return Err(Error::OutOfRange { value: i, max: self.max_number() });
        }
        let relabelled = self.cipher.encrypt(i);
        let digits = radix::decompose(relabelled, &self.template.radices, &self.significance);
        Ok(self.template.render(&digits))
    }

    /// Recover the integer a name was rendered from.
    ///
    /// Slots should be separated by literal text the slot patterns cannot
    /// absorb. Adjacent unseparated slots (say `"%99#2%"`) split greedily,
    /// so some names parse to a different integer than the one that
    /// rendered them.
    pub fn int_from_name(&self, name: &str) -> Result<u64> {
        let digits = self.template.parse(name)?;
        let relabelled = radix::compose(&digits, &self.template.radices, &self.significance);
        Ok(self.cipher.decrypt(relabelled))
    }

    /// Uniform integer in `[0, capacity)`. Draws from the seeded generator
    /// when one was configured, otherwise from OS entropy. Modulo bias for
    /// non-power-of-two capacities is accepted. The entropy path interprets
    /// its bytes under the configured byte order; [`ByteOrder::Ranks`] has
    /// no byte-level meaning and falls back to little-endian.
    pub fn random_int(&self) -> u64 {
        if let Some(rng) = &self.rng {
            let mut rng = rng.lock().expect("sampler mutex poisoned");
            let r: f64 = rng.gen();
            ((r * self.capacity() as f64) as u64).min(self.max_number())
        } else {
            let bits = 64 - self.max_number().leading_zeros();
            let nbytes = ((bits + 7) / 8).max(1) as usize;
            let mut buf = [0u8; 8];
            OsRng.fill_bytes(&mut buf[..nbytes]);
            let raw = match self.byte_order {
                ByteOrder::Big => buf[..nbytes].iter().fold(0u64, |acc, &b| (acc << 8) | b as u64),
                _ => u64::from_le_bytes(buf),
            };
            raw % self.capacity()
        }
    }

    pub fn random_name(&self) -> Result<String> {
        self.name_from_int(self.random_int())
    }

    /// Pair an integer with its rendered name.
    pub fn named(&self, i: u64) -> Result<NamedNumber> {
        Ok(NamedNumber::new(i, self.name_from_int(i)?))
    }

    /// Recover the pair from a rendered name.
    pub fn named_from_str(&self, name: &str) -> Result<NamedNumber> {
        let i = self.int_from_name(name)?;
        Ok(NamedNumber::new(i, name.to_string()))
    }

    pub fn random_named(&self) -> Result<NamedNumber> {
        self.named(self.random_int())
    }

    /// Render every integer the iterator yields, e.g.
    /// `fmt.range((0..100).step_by(10))`.
    pub fn range<I>(&self, ints: I) -> Result<Vec<NamedNumber>>
    where
        I: IntoIterator<Item = u64>,
    {
        ints.into_iter().map(|i| self.named(i)).collect()
    }
}

impl std::fmt::Debug for NameFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameFormat")
            .field("template", &self.template.text)
            .field("capacity", &self.template.capacity)
            .finish_non_exhaustive()
    }
}

/// Configures and builds a [`NameFormat`].
#[derive(Debug, Clone)]
pub struct NameFormatBuilder {
    fmt: String,
    options: Options,
    seed: Option<u64>,
    byte_order: ByteOrder,
    randomized: bool,
}

impl Default for NameFormatBuilder {
    fn default() -> Self {
        Self {
            fmt: DEFAULT_TEMPLATE.to_string(),
            options: Options::new(),
            seed: None,
            byte_order: ByteOrder::default(),
            randomized: false,
        }
    }
}

impl NameFormatBuilder {
    pub fn template(mut self, fmt: impl Into<String>) -> Self {
        self.fmt = fmt.into();
        self
    }

    /// Replace the whole alphabet store.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Override a single slot alphabet.
    pub fn group(mut self, name: impl Into<String>, alphabet: Alphabet) -> Self {
        self.options.insert(name, alphabet);
        self
    }

    pub fn groups(mut self, groups: HashMap<String, Alphabet>) -> Self {
        self.options.update(groups);
        self
    }

    /// Seed the shared generator. Same template, alphabets and seed produce
    /// the same name/integer mapping across runs. Absent seed means OS
    /// entropy everywhere randomness is needed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Apply the permutation cipher so consecutive integers stop producing
    /// names that differ only in the fastest slot.
    pub fn randomized(mut self) -> Self {
        self.randomized = true;
        self
    }

    pub fn build(self) -> Result<NameFormat> {
        let template = template::interpret(&self.fmt, &self.options)?;
        let significance = self.byte_order.significance(template.slots.len())?;

        let mut rng = self.seed.map(StdRng::seed_from_u64);
        let cipher = if self.randomized {
            // The permutation consumes the shared generator: a seeded
            // cipher and sampler advance one cursor.
            let mut r = rng.take().unwrap_or_else(StdRng::from_entropy);
            let cipher = Cipher::randomized(template.capacity, &mut r)?;
            if self.seed.is_some() {
                rng = Some(r);
            }
            cipher
        } else {
            Cipher::Identity
        };

        log::debug!(
            "built format {:?}: capacity {}, {} cipher, seed {:?}",
            template.text,
            template.capacity,
            if self.randomized { "permutation" } else { "identity" },
            self.seed
        );

        Ok(NameFormat {
            template,
            significance,
            byte_order: self.byte_order,
            cipher,
            rng: rng.map(Mutex::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// The two-by-two fixture used throughout: capacity 4, big order.
    fn small_format() -> NameFormat {
        NameFormat::builder()
            .template("%adjective% %animal%")
            .group("adjective", Alphabet::words(&["brave", "calm"]))
            .group("animal", Alphabet::words(&["falcon", "otter"]))
            .byte_order(ByteOrder::Big)
            .build()
            .unwrap()
    }

    #[test]
    fn reproducible_example() -> anyhow::Result<()> {
        init_logger();
        let fmt = small_format();
        assert_eq!(fmt.capacity(), 4);
        assert_eq!(fmt.name_from_int(0)?, "brave falcon");
        assert_eq!(fmt.name_from_int(1)?, "brave otter");
        assert_eq!(fmt.name_from_int(2)?, "calm falcon");
        assert_eq!(fmt.name_from_int(3)?, "calm otter");
        assert_eq!(fmt.int_from_name("calm otter")?, 3);
        Ok(())
    }

    #[test]
    fn round_trips_everywhere() -> anyhow::Result<()> {
        let formats = [
            NameFormat::new("%adjective%-%animal%")?,
            NameFormat::builder()
                .template("%color% %animal% %99%")
                .byte_order(ByteOrder::Big)
                .build()?,
            NameFormat::builder()
                .template("%adjective% %animal%")
                .seed(12345)
                .randomized()
                .build()?,
            NameFormat::builder()
                .template("%color%:%letter#2%")
                .byte_order(ByteOrder::Ranks(vec![2, 0, 1]))
                .build()?,
        ];
        for fmt in &formats {
            let step = (fmt.capacity() / 512).max(1) as usize;
            for i in (0..fmt.capacity()).step_by(step) {
                let name = fmt.name_from_int(i)?;
                assert_eq!(fmt.int_from_name(&name)?, i, "format {:?}", fmt);
            }
        }
        Ok(())
    }

    #[test]
    fn randomized_round_trips_exhaustively() -> anyhow::Result<()> {
        let fmt = NameFormat::builder()
            .template("%emotion% %animal%")
            .group("emotion", Alphabet::words(&["happy", "sad", "angry", "hungry", "sleepy"]))
            .seed(99)
            .randomized()
            .build()?;
        assert_eq!(fmt.capacity(), 5 * 32);
        let mut names = Vec::new();
        for i in 0..fmt.capacity() {
            let name = fmt.name_from_int(i)?;
            assert_eq!(fmt.int_from_name(&name)?, i);
            names.push(name);
        }
        // The mapping is a relabelling: all names distinct.
        names.sort();
        names.dedup();
        assert_eq!(names.len() as u64, fmt.capacity());
        Ok(())
    }

    #[test]
    fn unseeded_randomized_still_round_trips() -> anyhow::Result<()> {
        let fmt = NameFormat::builder()
            .template("%adjective% %animal%")
            .randomized()
            .build()?;
        for i in (0..fmt.capacity()).step_by(17) {
            assert_eq!(fmt.int_from_name(&fmt.name_from_int(i)?)?, i);
        }
        Ok(())
    }

    #[test]
    fn range_bounds_are_enforced() -> anyhow::Result<()> {
        let fmt = small_format();
        assert!(fmt.name_from_int(0).is_ok());
        assert!(fmt.name_from_int(fmt.max_number()).is_ok());
        let err = fmt.name_from_int(fmt.capacity()).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { value: 4, max: 3 }));
        Ok(())
    }

    #[test]
    fn counting_template() -> anyhow::Result<()> {
        let fmt = NameFormat::new("%99%")?;
        assert_eq!(fmt.capacity(), 99);
        assert_eq!(fmt.name_from_int(0)?, "0");
        assert_eq!(fmt.name_from_int(98)?, "98");
        assert!(matches!(fmt.name_from_int(99), Err(Error::OutOfRange { .. })));
        assert_eq!(fmt.int_from_name("42")?, 42);
        Ok(())
    }

    #[test]
    fn custom_alphabet_override() -> anyhow::Result<()> {
        let fmt = NameFormat::builder()
            .template("%emotion% %animal%")
            .group("emotion", Alphabet::words(&["happy", "sad", "angry", "hungry", "sleepy"]))
            .build()?;
        assert_eq!(fmt.capacity(), 5 * 32);
        assert!(fmt.int_from_name("happy otter").is_ok());
        let err = fmt.int_from_name("bored otter").unwrap_err();
        assert!(matches!(err, Error::NotInAlphabet { .. }));
        Ok(())
    }

    #[test]
    fn same_seed_same_mapping() -> anyhow::Result<()> {
        let build = || {
            NameFormat::builder()
                .template("%adjective% %animal%")
                .seed(2024)
                .randomized()
                .build()
        };
        let (a, b) = (build()?, build()?);
        for i in 0..a.capacity() {
            assert_eq!(a.name_from_int(i)?, b.name_from_int(i)?);
        }
        // The shared generator is also in the same state: first draws agree.
        assert_eq!(a.random_int(), b.random_int());
        Ok(())
    }

    #[test]
    fn seeded_sampler_stays_in_range() -> anyhow::Result<()> {
        let fmt = NameFormat::builder().seed(7).build()?;
        for _ in 0..1000 {
            assert!(fmt.random_int() < fmt.capacity());
        }
        Ok(())
    }

    #[test]
    fn entropy_sampler_stays_in_range() -> anyhow::Result<()> {
        let fmt = small_format();
        for _ in 0..1000 {
            assert!(fmt.random_int() < fmt.capacity());
        }
        let one = NameFormat::new("no-slots-here")?;
        assert_eq!(one.random_int(), 0);
        Ok(())
    }

    #[test]
    fn range_renders_a_sequence() -> anyhow::Result<()> {
        let fmt = small_format();
        let named = fmt.range((0..4).step_by(2))?;
        assert_eq!(named.len(), 2);
        assert_eq!(named[0], 0);
        assert_eq!(named[0], "brave falcon");
        assert_eq!(named[1], 2);
        assert_eq!(named[1], "calm falcon");
        assert!(fmt.range(0..5).is_err());
        Ok(())
    }

    #[test]
    fn named_numbers_reverse() -> anyhow::Result<()> {
        let fmt = small_format();
        let n = fmt.named(3)?;
        assert_eq!(n, 3);
        assert_eq!(n, "calm otter");
        let back = fmt.named_from_str(n.name())?;
        assert_eq!(back, n);
        let r = fmt.random_named()?;
        assert_eq!(fmt.int_from_name(r.name())?, r.value());
        Ok(())
    }

    #[test]
    fn oversized_permutation_is_a_build_error() {
        let err = NameFormat::builder()
            .template("%letter#8%")
            .seed(1)
            .randomized()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::PermutationTooLarge { .. }));
    }

    #[test]
    fn default_template_builds() -> anyhow::Result<()> {
        let fmt = NameFormat::builder().build()?;
        assert_eq!(fmt.template(), DEFAULT_TEMPLATE);
        assert_eq!(fmt.capacity(), 32 * 32);
        Ok(())
    }
}
