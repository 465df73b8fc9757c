//! The rune walker: one left-to-right pass over the input's scalar values.
//!
//! For each scalar, in priority order:
//! 1. excluded scalars are copied through untouched;
//! 2. (H2z only) a combining mark that is not the first scalar is joined with
//!    the previous *source* scalar, and if the pair has a fused entry the last
//!    output element is replaced by it;
//! 3. everything else is looked up alone and falls back to itself.

use std::borrow::Cow;

use rustc_hash::FxHashSet;

use crate::debug_note;
use crate::mode::{Direction, Mode};
use crate::selector;
use crate::tables;

/// Converts `text` in `direction` using the categories selected by `mode`.
///
/// Scalars listed in `ignore` are never converted. Comparison is exact string
/// equality per scalar, so only single-character entries can ever match.
///
/// ```
/// use zenhan::{walker, Direction, Mode};
///
/// let out = walker::convert("ｶﾞｷﾞ", Direction::H2z, Mode::KANA, &["ｷ"]);
/// assert_eq!(out, "ガギ");
/// ```
pub fn convert<S: AsRef<str>>(
    text: &str,
    direction: Direction,
    mode: Mode,
    ignore: &[S],
) -> String {
    if text.is_empty() {
        return String::new();
    }

    let dict = selector::select(direction, mode);
    let ignore: FxHashSet<&str> = ignore.iter().map(|s| s.as_ref()).collect();
    let fuses = direction == Direction::H2z;

    let mut converted: Vec<&str> = Vec::with_capacity(text.len());
    let mut fused_key = String::with_capacity(8);
    let mut prev: Option<&str> = None;

    for (i, c) in text.char_indices() {
        let curr = &text[i..i + c.len_utf8()];

        if ignore.contains(curr) {
            converted.push(curr);
            prev = Some(curr);
            continue;
        }

        let fused = match prev {
            Some(p) if fuses && tables::is_combining_mark(c) => {
                fused_key.clear();
                fused_key.push_str(p);
                fused_key.push_str(curr);
                dict.get(&fused_key)
            }
            _ => None,
        };

        match fused {
            Some(value) => {
                // Every iteration pushes one element, so there is always one to replace.
                converted.pop();
                converted.push(value);
            }
            None => {
                let value = match dict.get(curr) {
                    Some(v) => v,
                    None => curr,
                };
                converted.push(value);
            }
        }

        prev = Some(curr);
    }

    converted.concat()
}

/// Byte-level [`convert`]: input that is not well-formed UTF-8 is returned
/// unchanged, borrowed, without any conversion.
///
/// ```
/// use std::borrow::Cow;
/// use zenhan::{walker, Direction, Mode};
///
/// let bad = [0xff, 0xfe, 0xfd];
/// let out = walker::convert_bytes(&bad, Direction::Z2h, Mode::ALL, &[] as &[&str]);
/// assert!(matches!(out, Cow::Borrowed(_)));
/// assert_eq!(&*out, &bad);
/// ```
pub fn convert_bytes<'a, S: AsRef<str>>(
    input: &'a [u8],
    direction: Direction,
    mode: Mode,
    ignore: &[S],
) -> Cow<'a, [u8]> {
    match std::str::from_utf8(input) {
        Ok(text) => Cow::Owned(convert(text, direction, mode, ignore).into_bytes()),
        Err(err) => {
            debug_note!(
                "malformed UTF-8 passed through unchanged ({}, {} bytes)",
                err,
                input.len()
            );
            Cow::Borrowed(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn empty_input() {
        for bits in 0..=7 {
            let mode = Mode::from_bits(bits);
            assert_eq!(convert("", Direction::H2z, mode, NONE), "");
            assert_eq!(convert("", Direction::Z2h, mode, NONE), "");
        }
    }

    #[test]
    fn fuses_dakuten_with_previous_kana() {
        assert_eq!(convert("ｶﾞ", Direction::H2z, Mode::KANA, NONE), "ガ");
        assert_eq!(convert("ﾊﾟﾋﾟ", Direction::H2z, Mode::KANA, NONE), "パピ");
        assert_eq!(convert("ｳﾞ", Direction::H2z, Mode::KANA, NONE), "ヴ");
    }

    #[test]
    fn leading_mark_is_converted_alone() {
        assert_eq!(convert("ﾞ", Direction::H2z, Mode::KANA, NONE), "゛");
        assert_eq!(convert("ﾟｱ", Direction::H2z, Mode::KANA, NONE), "゜ア");
    }

    #[test]
    fn mark_without_fused_entry_stays_separate() {
        // ｱ has no voiced form; ﾟ after ﾍﾟ looks back at ﾟ, not at ﾍ.
        assert_eq!(convert("ｱﾞ", Direction::H2z, Mode::KANA, NONE), "ア゛");
        assert_eq!(convert("ﾍﾟﾟ", Direction::H2z, Mode::KANA, NONE), "ペ゜");
        assert_eq!(convert("aﾞ", Direction::H2z, Mode::ALL, NONE), "ａ゛");
    }

    #[test]
    fn mark_passes_through_when_kana_not_selected() {
        assert_eq!(convert("ｶﾞ", Direction::H2z, Mode::ASCII, NONE), "ｶﾞ");
    }

    #[test]
    fn z2h_decomposes_fused_kana() {
        assert_eq!(convert("ガパ", Direction::Z2h, Mode::KANA, NONE), "ｶﾞﾊﾟ");
        // No fusion in this direction: the halfwidth pair is left as is.
        assert_eq!(convert("ｶﾞ", Direction::Z2h, Mode::ALL, NONE), "ｶﾞ");
    }

    #[test]
    fn excluded_mark_is_not_fused() {
        assert_eq!(convert("ｶﾞ", Direction::H2z, Mode::KANA, &["ﾞ"]), "カﾞ");
    }

    #[test]
    fn excluded_base_can_still_be_replaced_by_fusion() {
        assert_eq!(convert("ｶﾞ", Direction::H2z, Mode::KANA, &["ｶ"]), "ガ");
        assert_eq!(convert("ｶ", Direction::H2z, Mode::KANA, &["ｶ"]), "ｶ");
    }

    #[test]
    fn multi_char_ignore_entries_never_match() {
        assert_eq!(convert("ab", Direction::H2z, Mode::ASCII, &["ab"]), "ａｂ");
    }

    #[test]
    fn owned_ignore_list() {
        let ignore = vec!["Ａ".to_string()];
        assert_eq!(convert("ＡＢ", Direction::Z2h, Mode::ASCII, &ignore), "ＡB");
    }

    #[test]
    fn bytes_valid_utf8_is_converted() {
        let out = convert_bytes("ｱ1".as_bytes(), Direction::H2z, Mode::ALL, NONE);
        assert_eq!(&*out, "ア１".as_bytes());
    }

    #[test]
    fn bytes_invalid_utf8_passthrough() {
        let bad: &[u8] = &[0x61, 0xff, 0xfe, 0xfd];
        let out = convert_bytes(bad, Direction::H2z, Mode::ALL, NONE);
        assert_eq!(&*out, bad);
    }
}
