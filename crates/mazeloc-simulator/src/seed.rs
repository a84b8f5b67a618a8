use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Errors returned when parsing a [`SimulationSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The text is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {length} characters")]
    Length {
        /// Number of characters found.
        length: usize,
    },
    /// The text contains a character that is not a hex digit.
    #[display("invalid hex digit {character:?} at position {position}")]
    InvalidDigit {
        /// Zero-based character position.
        position: usize,
        /// The offending character.
        character: char,
    },
}

/// A 256-bit seed that makes a simulation reproducible.
///
/// Seeds are written as 64 lowercase hex digits and parse from either case.
///
/// # Examples
///
/// ```
/// use mazeloc_simulator::SimulationSeed;
///
/// let seed: SimulationSeed =
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1".parse()?;
/// assert_eq!(seed.as_bytes()[0], 0xc1);
/// assert_eq!(seed.to_string().parse::<SimulationSeed>()?, seed);
///
/// assert!("c1d4".parse::<SimulationSeed>().is_err());
/// # Ok::<(), mazeloc_simulator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimulationSeed([u8; 32]);

impl SimulationSeed {
    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for SimulationSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for SimulationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for SimulationSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if length != 64 {
            return Err(ParseSeedError::Length { length });
        }
        let nibbles = s
            .chars()
            .enumerate()
            .map(|(position, character)| {
                character
                    .to_digit(16)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or(ParseSeedError::InvalidDigit {
                        position,
                        character,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(nibbles.chunks_exact(2)) {
            *byte = (pair[0] << 4) | pair[1];
        }
        Ok(Self(bytes))
    }
}
