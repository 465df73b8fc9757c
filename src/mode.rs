//! Category selection flags and conversion direction.
//!
//! [`Mode`] is a small bitmask over the three [`Category`] tables. Masks are
//! combined with `|` and tested with bitwise AND, so `Mode::ASCII | Mode::KANA`
//! selects two tables at once.
//!
//! Both [`Mode`] and [`Direction`] parse from the short string forms used by
//! the CLI, the C API and JSON profiles.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZenhanError;

/// One of the three independently selectable mapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ascii,
    Digit,
    Kana,
}

impl Category {
    /// All categories in union order.
    pub const ALL: [Category; 3] = [Category::Ascii, Category::Digit, Category::Kana];

    /// The single-bit [`Mode`] selecting this category.
    #[inline]
    pub const fn mode(self) -> Mode {
        match self {
            Category::Ascii => Mode::ASCII,
            Category::Digit => Mode::DIGIT,
            Category::Kana => Mode::KANA,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::Ascii => "ascii",
            Category::Digit => "digit",
            Category::Kana => "kana",
        }
    }
}

/// Bitmask of requested categories.
///
/// | bit | value | category |
/// |-----|-------|----------|
/// | 0   | 1     | ASCII    |
/// | 1   | 2     | DIGIT    |
/// | 2   | 4     | KANA     |
///
/// Any bit pattern is accepted by the conversion functions; bits outside
/// [`Mode::ALL`] simply select nothing. [`Mode::from_ffi`] is stricter.
///
/// # Example
/// ```
/// use zenhan::Mode;
///
/// let mode = Mode::ASCII | Mode::KANA;
/// assert!(mode.contains(Mode::KANA));
/// assert!(!mode.contains(Mode::DIGIT));
/// assert_eq!(mode.to_string(), "ascii|kana");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mode(u32);

impl Mode {
    pub const NONE: Mode = Mode(0);
    pub const ASCII: Mode = Mode(1 << 0);
    pub const DIGIT: Mode = Mode(1 << 1);
    pub const KANA: Mode = Mode(1 << 2);
    pub const ALL: Mode = Mode(Self::ASCII.0 | Self::DIGIT.0 | Self::KANA.0);

    /// Wraps raw bits without validation.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Mode(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Mode) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 & Self::ALL.0 == 0
    }

    /// Selected categories, in union order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |c| self.contains(c.mode()))
    }

    /// Checked conversion for values coming across the C ABI.
    ///
    /// Returns `None` when any bit outside [`Mode::ALL`] is set.
    ///
    /// ```
    /// use zenhan::Mode;
    /// assert_eq!(Mode::from_ffi(5), Some(Mode::ASCII | Mode::KANA));
    /// assert_eq!(Mode::from_ffi(8), None);
    /// ```
    pub const fn from_ffi(bits: u32) -> Option<Self> {
        if bits & !Self::ALL.0 != 0 {
            None
        } else {
            Some(Mode(bits))
        }
    }
}

impl BitOr for Mode {
    type Output = Mode;

    #[inline]
    fn bitor(self, rhs: Mode) -> Mode {
        Mode(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mode {
    #[inline]
    fn bitor_assign(&mut self, rhs: Mode) {
        self.0 |= rhs.0;
    }
}

impl From<Category> for Mode {
    fn from(c: Category) -> Self {
        c.mode()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Mode::ALL {
            return f.write_str("all");
        }
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for c in self.categories() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(c.name())?;
            first = false;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Mode {
    type Error = ZenhanError;

    /// Parses `"ascii"`, `"digit"`, `"kana"`, `"all"`, `"none"` and any
    /// combination joined by `|`, `,` or `+` (case-insensitive).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ZenhanError::InvalidMode(value.to_string()));
        }

        let mut mode = Mode::NONE;
        for part in trimmed.split(['|', ',', '+']) {
            let part = part.trim();
            mode |= match part.to_ascii_lowercase().as_str() {
                "ascii" => Mode::ASCII,
                "digit" | "digits" => Mode::DIGIT,
                "kana" => Mode::KANA,
                "all" => Mode::ALL,
                "none" => Mode::NONE,
                _ => return Err(ZenhanError::InvalidMode(value.to_string())),
            };
        }
        Ok(mode)
    }
}

impl TryFrom<String> for Mode {
    type Error = ZenhanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Mode::try_from(value.as_str())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.to_string()
    }
}

impl FromStr for Mode {
    type Err = ZenhanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::try_from(s)
    }
}

/// Which way a conversion goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Hankaku (halfwidth) to Zenkaku (fullwidth).
    H2z,
    /// Zenkaku (fullwidth) to Hankaku (halfwidth).
    Z2h,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::H2z => "h2z",
            Direction::Z2h => "z2h",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Direction {
    type Error = ZenhanError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "h2z" | "han2zen" => Ok(Direction::H2z),
            "z2h" | "zen2han" => Ok(Direction::Z2h),
            _ => Err(ZenhanError::InvalidDirection(value.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = ZenhanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::try_from(s)
    }
}
