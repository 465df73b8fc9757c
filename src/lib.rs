//! Conversion between Zenkaku (fullwidth) and Hankaku (halfwidth) Japanese text.
//!
//! Three categories can be converted independently, selected with a [`Mode`]
//! bitmask: ASCII letters and symbols, digits, and katakana. Halfwidth kana
//! followed by a voiced (`ﾞ`) or semi-voiced (`ﾟ`) mark are fused into a
//! single fullwidth kana, and fullwidth voiced kana split back into two
//! halfwidth characters.
//!
//! ```
//! use zenhan::{h2z, z2h, Mode};
//!
//! assert_eq!(h2z("ｶﾞｷﾞ123", Mode::KANA, &[] as &[&str]), "ガギ123");
//! assert_eq!(z2h("ＡＢＣ　ガ", Mode::ALL, &["Ｂ"]), "AＢC ｶﾞ");
//! ```

use std::borrow::Cow;
use std::sync::Mutex;

pub mod error;
pub mod mode;
pub mod profile;
pub mod selector;
pub mod tables;
pub mod walker;

pub use crate::error::ZenhanError;
pub use crate::mode::{Category, Direction, Mode};
pub use crate::profile::ConvertProfile;

// Last error message recorded by the string-config entry points.
static LAST_ERROR: Mutex<Option<String>> = Mutex::new(None);

/// Converts halfwidth characters in `text` to fullwidth.
///
/// Characters of categories not selected by `mode`, characters outside every
/// table, and characters listed in `ignore` are copied through unchanged.
pub fn h2z<S: AsRef<str>>(text: &str, mode: Mode, ignore: &[S]) -> String {
    walker::convert(text, Direction::H2z, mode, ignore)
}

/// Converts fullwidth characters in `text` to halfwidth.
pub fn z2h<S: AsRef<str>>(text: &str, mode: Mode, ignore: &[S]) -> String {
    walker::convert(text, Direction::Z2h, mode, ignore)
}

/// Byte-level [`h2z`]. Input that is not valid UTF-8 is returned unchanged.
pub fn h2z_bytes<'a, S: AsRef<str>>(input: &'a [u8], mode: Mode, ignore: &[S]) -> Cow<'a, [u8]> {
    walker::convert_bytes(input, Direction::H2z, mode, ignore)
}

/// Byte-level [`z2h`]. Input that is not valid UTF-8 is returned unchanged.
pub fn z2h_bytes<'a, S: AsRef<str>>(input: &'a [u8], mode: Mode, ignore: &[S]) -> Cow<'a, [u8]> {
    walker::convert_bytes(input, Direction::Z2h, mode, ignore)
}

/// A reusable converter carrying a mode and an exclusion list.
///
/// ```
/// use zenhan::{Direction, Mode, Zenhan};
///
/// let zenhan = Zenhan::new().with_mode(Mode::ASCII).with_ignore(["@"]);
/// assert_eq!(zenhan.h2z("user@host"), "ｕｓｅｒ@ｈｏｓｔ");
/// assert_eq!(zenhan.convert("ｕｓｅｒ", Direction::Z2h), "user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zenhan {
    mode: Mode,
    ignore: Vec<String>,
}

impl Default for Zenhan {
    fn default() -> Self {
        Self::new()
    }
}

impl Zenhan {
    /// Converter for [`Mode::ALL`] with no exclusions.
    pub fn new() -> Self {
        Zenhan {
            mode: Mode::ALL,
            ignore: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = ignore.into_iter().map(Into::into).collect();
        self
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    pub fn h2z(&self, input: &str) -> String {
        h2z(input, self.mode, &self.ignore)
    }

    pub fn z2h(&self, input: &str) -> String {
        z2h(input, self.mode, &self.ignore)
    }

    pub fn convert(&self, input: &str, direction: Direction) -> String {
        walker::convert(input, direction, self.mode, &self.ignore)
    }

    /// Converts with a direction and mode given as strings
    /// (`"h2z"`/`"z2h"`, `"ascii|kana"`...), overriding this converter's mode.
    ///
    /// On an unrecognised direction or mode the input is returned unchanged
    /// and the reason is recorded in [`Zenhan::get_last_error`].
    ///
    /// ```
    /// use zenhan::Zenhan;
    ///
    /// let zenhan = Zenhan::new();
    /// assert_eq!(zenhan.convert_with_config("１２ｱ", "z2h", "digit"), "12ｱ");
    ///
    /// assert_eq!(zenhan.convert_with_config("１２", "sideways", "all"), "１２");
    /// assert!(Zenhan::get_last_error().unwrap().contains("sideways"));
    /// ```
    pub fn convert_with_config(&self, input: &str, direction: &str, mode: &str) -> String {
        let resolved = Direction::try_from(direction)
            .and_then(|d| Mode::try_from(mode).map(|m| (d, m)));

        match resolved {
            Ok((direction, mode)) => {
                Self::clear_last_error();
                walker::convert(input, direction, mode, &self.ignore)
            }
            Err(err) => {
                Self::set_last_error(&err.to_string());
                input.to_string()
            }
        }
    }

    // Function to set the last error message
    pub fn set_last_error(err_msg: &str) {
        let mut last_error = LAST_ERROR.lock().unwrap_or_else(|e| e.into_inner());
        *last_error = Some(err_msg.to_string());
    }

    // Function to retrieve the last error message
    pub fn get_last_error() -> Option<String> {
        let last_error = LAST_ERROR.lock().unwrap_or_else(|e| e.into_inner());
        last_error.clone()
    }

    pub fn clear_last_error() {
        let mut last_error = LAST_ERROR.lock().unwrap_or_else(|e| e.into_inner());
        *last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_functions_match_converter() {
        let zenhan = Zenhan::new().with_mode(Mode::DIGIT | Mode::KANA);
        let input = "ｱｲｳ123abc";
        assert_eq!(zenhan.h2z(input), h2z(input, Mode::DIGIT | Mode::KANA, &[] as &[&str]));
        assert_eq!(zenhan.h2z(input), "アイウ１２３abc");
    }

    #[test]
    fn set_mode_changes_selection() {
        let mut zenhan = Zenhan::default();
        assert_eq!(zenhan.get_mode(), Mode::ALL);
        zenhan.set_mode(Mode::ASCII);
        assert_eq!(zenhan.z2h("Ａ１"), "A１");
    }

    #[test]
    fn bytes_helpers_pass_malformed_input() {
        let bad: &[u8] = &[0xff, 0xfe, 0xfd];
        assert_eq!(&*h2z_bytes(bad, Mode::ALL, &[] as &[&str]), bad);
        assert_eq!(&*z2h_bytes(bad, Mode::ALL, &[] as &[&str]), bad);
    }

    #[test]
    fn invalid_mode_string_keeps_input() {
        let zenhan = Zenhan::new();
        assert_eq!(zenhan.convert_with_config("ａ", "z2h", "latin"), "ａ");
        assert_eq!(zenhan.ignore().len(), 0);
    }
}
