//! IPv4 address generator

use super::{MaskGenerator, MaskKind};
use crate::domain::GeneratorError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::net::Ipv4Addr;

/// Generates plausible-looking dotted-quad addresses
///
/// The first octet is drawn from 1-223 (unicast classes A to C); the remaining
/// three octets are uniform over 0-255.
pub struct Ipv4Generator<R = StdRng> {
    rng: R,
}

impl Ipv4Generator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R> Ipv4Generator<R> {
    /// Generator over a caller-supplied random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> MaskGenerator for Ipv4Generator<R> {
    fn kind(&self) -> MaskKind {
        MaskKind::Ipv4Address
    }

    fn generate(&mut self) -> Result<String, GeneratorError> {
        let first: u8 = self.rng.gen_range(1..=223);
        let [_, b, c, d] = self.rng.gen::<u32>().to_be_bytes();
        Ok(Ipv4Addr::new(first, b, c, d).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dotted_quad() {
        let mut gen = Ipv4Generator::from_entropy();
        for _ in 0..1000 {
            let value = gen.generate().unwrap();
            let octets: Vec<&str> = value.split('.').collect();
            assert_eq!(octets.len(), 4, "bad address: {value}");
            for octet in octets {
                assert!(octet.parse::<u8>().is_ok(), "bad octet in {value}");
            }
        }
    }

    #[test]
    fn test_first_octet_is_unicast() {
        let mut gen = Ipv4Generator::seeded(3);
        for _ in 0..1000 {
            let addr: Ipv4Addr = gen.generate().unwrap().parse().unwrap();
            let first = addr.octets()[0];
            assert!((1..=223).contains(&first));
        }
    }

    #[test]
    fn test_values_spread() {
        let mut gen = Ipv4Generator::seeded(11);
        let values: HashSet<String> = (0..500).map(|_| gen.generate().unwrap()).collect();
        assert_eq!(values.len(), 500);
    }
}
