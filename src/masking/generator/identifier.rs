//! Device identifier generator

use super::{MaskGenerator, MaskKind};
use crate::domain::GeneratorError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Digit count of each identifier group
pub const GROUP_WIDTHS: [usize; 3] = [3, 2, 3];

/// Generates `DDD-DD-DDD` identifiers
///
/// Each group is drawn independently and uniformly: 100-999, 10-99, 100-999.
/// That gives 900 * 90 * 900 possible values, so collisions between distinct
/// raw identifiers are possible but rare for login-sized batches.
pub struct IdentifierGenerator<R = StdRng> {
    rng: R,
}

impl IdentifierGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R> IdentifierGenerator<R> {
    /// Generator over a caller-supplied random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> MaskGenerator for IdentifierGenerator<R> {
    fn kind(&self) -> MaskKind {
        MaskKind::DeviceIdentifier
    }

    fn generate(&mut self) -> Result<String, GeneratorError> {
        let head: u16 = self.rng.gen_range(100..=999);
        let middle: u8 = self.rng.gen_range(10..=99);
        let tail: u16 = self.rng.gen_range(100..=999);
        Ok(format!("{head}-{middle}-{tail}"))
    }
}
