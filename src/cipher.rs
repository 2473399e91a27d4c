// Permutation cipher: a bijective relabelling of [0, capacity) that
// decorrelates sequential integers from sequential names. Obfuscation
// only, not encryption.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Error, Result};

/// Largest capacity for which the cipher will materialize its tables.
/// Two `u64` tables at this size are about 256 MiB.
pub const MAX_PERMUTATION_CAPACITY: u64 = 1 << 24;

#[derive(Debug)]
pub(crate) enum Cipher {
    Identity,
    Permutation { forward: Vec<u64>, inverse: Vec<u64> },
}

impl Cipher {
    /// Draw a uniformly random permutation of `[0, capacity)` from the
    /// generator. The inverse table is precomputed so decrypt stays O(1).
    pub fn randomized(capacity: u64, rng: &mut StdRng) -> Result<Self> {
        if capacity > MAX_PERMUTATION_CAPACITY {
            return Err(Error::PermutationTooLarge { capacity, limit: MAX_PERMUTATION_CAPACITY });
        }
        let mut forward: Vec<u64> = (0..capacity).collect();
        forward.shuffle(rng);
        let mut inverse = vec![0u64; capacity as usize];
        for (i, &j) in forward.iter().enumerate() {
            inverse[j as usize] = i as u64;
        }
        Ok(Cipher::Permutation { forward, inverse })
    }

    pub fn encrypt(&self, i: u64) -> u64 {
        match self {
            Cipher::Identity => i,
            Cipher::Permutation { forward, .. } => forward[i as usize],
        }
    }

    pub fn decrypt(&self, j: u64) -> u64 {
        match self {
            Cipher::Identity => j,
            Cipher::Permutation { inverse, .. } => inverse[j as usize],
        }
    }
}
