//! Masked value generators
//!
//! Every identifying field is masked by a [`MaskGenerator`]: a source of fresh,
//! independently drawn values of one [`MaskKind`]. The engine only ever calls
//! [`MaskGenerator::generate`], so new identifier kinds can be added here without
//! touching duplicate detection.

pub mod identifier;
pub mod network;

pub use identifier::IdentifierGenerator;
pub use network::Ipv4Generator;

use crate::domain::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Shape of a masked value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    /// Three dash-separated digit groups, `DDD-DD-DDD`
    DeviceIdentifier,
    /// Dotted-quad IPv4 address
    Ipv4Address,
}

impl MaskKind {
    /// Human-readable label for logs and errors
    pub fn label(&self) -> &'static str {
        match self {
            Self::DeviceIdentifier => "device identifier",
            Self::Ipv4Address => "IPv4 address",
        }
    }

    /// Checks whether `value` has the shape of this kind
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::DeviceIdentifier => {
                let groups: Vec<&str> = value.split('-').collect();
                groups.len() == 3
                    && groups
                        .iter()
                        .zip(identifier::GROUP_WIDTHS)
                        .all(|(group, width)| {
                            group.len() == width && group.bytes().all(|b| b.is_ascii_digit())
                        })
            }
            Self::Ipv4Address => value.parse::<Ipv4Addr>().is_ok(),
        }
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Produces fresh masked values of one kind
pub trait MaskGenerator: Send {
    /// Kind of value this generator produces
    fn kind(&self) -> MaskKind;

    /// Draw one fresh masked value
    fn generate(&mut self) -> Result<String, GeneratorError>;
}

impl<G: MaskGenerator + ?Sized> MaskGenerator for Box<G> {
    fn kind(&self) -> MaskKind {
        (**self).kind()
    }

    fn generate(&mut self) -> Result<String, GeneratorError> {
        (**self).generate()
    }
}

/// Generator backed by a closure
pub struct FnGenerator<F> {
    kind: MaskKind,
    generate: F,
}

/// Wraps a closure as a [`MaskGenerator`] of the given kind
///
/// # Examples
///
/// ```
/// use maskload::masking::generator::{from_fn, MaskGenerator, MaskKind};
///
/// let mut fixed = from_fn(MaskKind::Ipv4Address, || Ok("192.0.2.1".to_string()));
/// assert_eq!(fixed.generate().unwrap(), "192.0.2.1");
/// ```
pub fn from_fn<F>(kind: MaskKind, generate: F) -> FnGenerator<F>
where
    F: FnMut() -> Result<String, GeneratorError> + Send,
{
    FnGenerator { kind, generate }
}

impl<F> MaskGenerator for FnGenerator<F>
where
    F: FnMut() -> Result<String, GeneratorError> + Send,
{
    fn kind(&self) -> MaskKind {
        self.kind
    }

    fn generate(&mut self) -> Result<String, GeneratorError> {
        (self.generate)()
    }
}
