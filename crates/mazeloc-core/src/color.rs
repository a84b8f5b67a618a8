//! Floor colors reported by the robot's sensor.

use std::fmt::{self, Display};

/// The color of a floor cell.
///
/// A maze has exactly four colors. Every floor cell carries one of them and a
/// wall carries none.
///
/// # Examples
///
/// ```
/// use mazeloc_core::Color;
///
/// assert_eq!(Color::from_char('G'), Some(Color::Green));
/// assert_eq!(Color::Green.as_char(), 'G');
/// assert_eq!(Color::Green.index(), 1);
///
/// let others: Vec<_> = Color::Red.others().collect();
/// assert_eq!(others, [Color::Green, Color::Blue, Color::Yellow]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    /// Red, written `R`.
    Red = 0,
    /// Green, written `G`.
    Green = 1,
    /// Blue, written `B`.
    Blue = 2,
    /// Yellow, written `Y`.
    Yellow = 3,
}

impl Color {
    /// Number of distinct colors.
    pub const COUNT: usize = 4;

    /// All colors in R, G, B, Y order.
    pub const ALL: [Self; Self::COUNT] = [Self::Red, Self::Green, Self::Blue, Self::Yellow];

    /// Returns the position of this color in [`Color::ALL`].
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the maze-file token for this color.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Yellow => 'Y',
        }
    }

    /// Parses a maze-file token. Tokens are case-sensitive.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            'B' => Some(Self::Blue),
            'Y' => Some(Self::Yellow),
            _ => None,
        }
    }

    /// Returns the three colors other than `self`, in [`Color::ALL`] order.
    pub fn others(self) -> impl Iterator<Item = Self> + Clone {
        Self::ALL.into_iter().filter(move |&c| c != self)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
