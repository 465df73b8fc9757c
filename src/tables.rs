//! Static category tables.
//!
//! Every category is defined by two parallel literal sequences, the fullwidth
//! forms and the halfwidth forms, matched by position. Each direction of a
//! category is one [`Table`] built by zipping the sequences once, on first
//! use, and never mutated afterwards.
//!
//! Keys and values are `&'static str` rather than `char` because the fused
//! kana (`ｶﾞ` and friends) are two scalar values on the halfwidth side.

use std::collections::hash_map::Entry;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::mode::{Category, Direction};

/// Print a developer note to **stderr** in *debug* builds; **no-op** in release.
///
/// Accepts the same syntax as [`eprintln!`].
///
/// ```
/// use zenhan::debug_note;
///
/// debug_note!("duplicate key ignored (first-wins): key={}", "ｱ");
/// ```
#[macro_export]
macro_rules! debug_note {
    ($($arg:tt)*) => {
        #[allow(unused)]
        {
            if cfg!(debug_assertions) {
                eprintln!($($arg)*);
            }
        }
    };
}

/// One direction of one category: source form → target form.
pub type Table = FxHashMap<&'static str, &'static str>;

/// Halfwidth voiced mark (dakuten).
pub const DAKUTEN: char = 'ﾞ';
/// Halfwidth semi-voiced mark (handakuten).
pub const HANDAKUTEN: char = 'ﾟ';

const ZEN_ASCII: &[&str] = &[
    "ａ", "ｂ", "ｃ", "ｄ", "ｅ", "ｆ", "ｇ", "ｈ", "ｉ",
    "ｊ", "ｋ", "ｌ", "ｍ", "ｎ", "ｏ", "ｐ", "ｑ", "ｒ",
    "ｓ", "ｔ", "ｕ", "ｖ", "ｗ", "ｘ", "ｙ", "ｚ",
    "Ａ", "Ｂ", "Ｃ", "Ｄ", "Ｅ", "Ｆ", "Ｇ", "Ｈ", "Ｉ",
    "Ｊ", "Ｋ", "Ｌ", "Ｍ", "Ｎ", "Ｏ", "Ｐ", "Ｑ", "Ｒ",
    "Ｓ", "Ｔ", "Ｕ", "Ｖ", "Ｗ", "Ｘ", "Ｙ", "Ｚ",
    "！", "”", "＃", "＄", "％", "＆", "’", "（", "）",
    "＊", "＋", "，", "−", "．", "／", "：", "；", "＜",
    "＝", "＞", "？", "＠", "［", "￥", "］", "＾", "＿",
    "‘", "｛", "｜", "｝", "〜", "　",
];

const HAN_ASCII: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i",
    "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z",
    "A", "B", "C", "D", "E", "F", "G", "H", "I",
    "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
    "!", "\"", "#", "$", "%", "&", "'", "(", ")",
    "*", "+", ",", "-", ".", "/", ":", ";", "<",
    "=", ">", "?", "@", "[", "\\", "]", "^", "_",
    "`", "{", "|", "}", "~", " ",
];

const ZEN_DIGIT: &[&str] = &["０", "１", "２", "３", "４", "５", "６", "７", "８", "９"];

const HAN_DIGIT: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

const ZEN_KANA: &[&str] = &[
    "ア", "イ", "ウ", "エ", "オ",
    "カ", "キ", "ク", "ケ", "コ",
    "サ", "シ", "ス", "セ", "ソ",
    "タ", "チ", "ツ", "テ", "ト",
    "ナ", "ニ", "ヌ", "ネ", "ノ",
    "ハ", "ヒ", "フ", "ヘ", "ホ",
    "マ", "ミ", "ム", "メ", "モ",
    "ヤ", "ユ", "ヨ",
    "ラ", "リ", "ル", "レ", "ロ",
    "ワ", "ヲ", "ン",
    "ァ", "ィ", "ゥ", "ェ", "ォ",
    "ッ", "ャ", "ュ", "ョ", "ヴ",
    "ガ", "ギ", "グ", "ゲ", "ゴ",
    "ザ", "ジ", "ズ", "ゼ", "ゾ",
    "ダ", "ヂ", "ヅ", "デ", "ド",
    "バ", "ビ", "ブ", "ベ", "ボ",
    "パ", "ピ", "プ", "ペ", "ポ",
    "。", "、", "・", "゛", "゜", "「", "」", "ー",
];

const HAN_KANA: &[&str] = &[
    "ｱ", "ｲ", "ｳ", "ｴ", "ｵ",
    "ｶ", "ｷ", "ｸ", "ｹ", "ｺ",
    "ｻ", "ｼ", "ｽ", "ｾ", "ｿ",
    "ﾀ", "ﾁ", "ﾂ", "ﾃ", "ﾄ",
    "ﾅ", "ﾆ", "ﾇ", "ﾈ", "ﾉ",
    "ﾊ", "ﾋ", "ﾌ", "ﾍ", "ﾎ",
    "ﾏ", "ﾐ", "ﾑ", "ﾒ", "ﾓ",
    "ﾔ", "ﾕ", "ﾖ",
    "ﾗ", "ﾘ", "ﾙ", "ﾚ", "ﾛ",
    "ﾜ", "ｦ", "ﾝ",
    "ｧ", "ｨ", "ｩ", "ｪ", "ｫ",
    "ｯ", "ｬ", "ｭ", "ｮ", "ｳﾞ",
    "ｶﾞ", "ｷﾞ", "ｸﾞ", "ｹﾞ", "ｺﾞ",
    "ｻﾞ", "ｼﾞ", "ｽﾞ", "ｾﾞ", "ｿﾞ",
    "ﾀﾞ", "ﾁﾞ", "ﾂﾞ", "ﾃﾞ", "ﾄﾞ",
    "ﾊﾞ", "ﾋﾞ", "ﾌﾞ", "ﾍﾞ", "ﾎﾞ",
    "ﾊﾟ", "ﾋﾟ", "ﾌﾟ", "ﾍﾟ", "ﾎﾟ",
    "｡", "､", "･", "ﾞ", "ﾟ", "｢", "｣", "ｰ",
];

// Parallel sequences must line up one-to-one.
const _: () = assert!(ZEN_ASCII.len() == HAN_ASCII.len());
const _: () = assert!(ZEN_DIGIT.len() == HAN_DIGIT.len());
const _: () = assert!(ZEN_KANA.len() == HAN_KANA.len());

/// Builds one direction of a category by pairing `from[i]` with `to[i]`.
///
/// Duplicate keys are **first-wins**; a conflicting duplicate leaves a
/// debug-build note and is otherwise ignored.
fn zip_table(from: &[&'static str], to: &[&'static str]) -> Table {
    debug_assert_eq!(
        from.len(),
        to.len(),
        "parallel table sequences differ in length"
    );

    let mut table = Table::default();
    table.reserve(from.len());

    for (&key, &value) in from.iter().zip(to) {
        match table.entry(key) {
            Entry::Vacant(e) => {
                e.insert(value);
            }
            Entry::Occupied(e) => {
                if *e.get() != value {
                    debug_note!(
                        "duplicate key ignored (first-wins): key={:?}; kept={:?}, ignored={:?}",
                        key,
                        e.get(),
                        value
                    );
                }
            }
        }
    }

    table
}

static H2Z_ASCII: Lazy<Table> = Lazy::new(|| zip_table(HAN_ASCII, ZEN_ASCII));
static Z2H_ASCII: Lazy<Table> = Lazy::new(|| zip_table(ZEN_ASCII, HAN_ASCII));
static H2Z_DIGIT: Lazy<Table> = Lazy::new(|| zip_table(HAN_DIGIT, ZEN_DIGIT));
static Z2H_DIGIT: Lazy<Table> = Lazy::new(|| zip_table(ZEN_DIGIT, HAN_DIGIT));
static H2Z_KANA: Lazy<Table> = Lazy::new(|| zip_table(HAN_KANA, ZEN_KANA));
static Z2H_KANA: Lazy<Table> = Lazy::new(|| zip_table(ZEN_KANA, HAN_KANA));

/// Read-only access to the static table for `category` in `direction`.
///
/// ```
/// use zenhan::{tables, Category, Direction};
///
/// let kana = tables::table(Category::Kana, Direction::H2z);
/// assert_eq!(kana.get("ｶﾞ"), Some(&"ガ"));
/// ```
pub fn table(category: Category, direction: Direction) -> &'static Table {
    match (category, direction) {
        (Category::Ascii, Direction::H2z) => &H2Z_ASCII,
        (Category::Ascii, Direction::Z2h) => &Z2H_ASCII,
        (Category::Digit, Direction::H2z) => &H2Z_DIGIT,
        (Category::Digit, Direction::Z2h) => &Z2H_DIGIT,
        (Category::Kana, Direction::H2z) => &H2Z_KANA,
        (Category::Kana, Direction::Z2h) => &Z2H_KANA,
    }
}

/// `true` for the two halfwidth combining marks.
#[inline]
pub fn is_combining_mark(c: char) -> bool {
    c == DAKUTEN || c == HANDAKUTEN
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTIONS: [Direction; 2] = [Direction::H2z, Direction::Z2h];

    #[test]
    fn table_sizes() {
        for direction in DIRECTIONS {
            assert_eq!(table(Category::Ascii, direction).len(), 85);
            assert_eq!(table(Category::Digit, direction).len(), 10);
            assert_eq!(table(Category::Kana, direction).len(), 89);
        }
    }

    #[test]
    fn directions_are_inverse() {
        for category in Category::ALL {
            let forward = table(category, Direction::H2z);
            let backward = table(category, Direction::Z2h);
            for (&han, &zen) in forward.iter() {
                assert_eq!(backward.get(zen), Some(&han), "{:?} {}", category, han);
            }
        }
    }

    #[test]
    fn categories_are_disjoint() {
        for direction in DIRECTIONS {
            for (i, a) in Category::ALL.iter().enumerate() {
                for b in &Category::ALL[i + 1..] {
                    let ta = table(*a, direction);
                    let tb = table(*b, direction);
                    assert!(
                        ta.keys().all(|k| !tb.contains_key(k)),
                        "{:?} and {:?} overlap in {:?}",
                        a,
                        b,
                        direction
                    );
                }
            }
        }
    }

    #[test]
    fn fused_entries_are_two_scalars() {
        let h2z = table(Category::Kana, Direction::H2z);
        let fused: Vec<_> = h2z.keys().filter(|k| k.chars().count() == 2).collect();
        assert_eq!(fused.len(), 26);
        for key in fused {
            let last = key.chars().last().unwrap();
            assert!(is_combining_mark(last), "{}", key);
            assert_eq!(h2z[key].chars().count(), 1);
        }

        let z2h = table(Category::Kana, Direction::Z2h);
        assert_eq!(z2h.get("ヴ"), Some(&"ｳﾞ"));
        assert_eq!(z2h.get("ポ"), Some(&"ﾎﾟ"));
    }

    #[test]
    fn marks_have_standalone_entries() {
        let h2z = table(Category::Kana, Direction::H2z);
        assert_eq!(h2z.get("ﾞ"), Some(&"゛"));
        assert_eq!(h2z.get("ﾟ"), Some(&"゜"));
    }

    #[test]
    fn japanese_style_symbols() {
        let z2h = table(Category::Ascii, Direction::Z2h);
        assert_eq!(z2h.get("￥"), Some(&"\\"));
        assert_eq!(z2h.get("〜"), Some(&"~"));
        assert_eq!(z2h.get("−"), Some(&"-"));
        assert_eq!(z2h.get("　"), Some(&" "));
        assert_eq!(z2h.get("０"), None);
    }

    #[test]
    fn zip_table_keeps_first_value() {
        let t = zip_table(&["a", "a", "b"], &["1", "2", "3"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("a"), Some(&"1"));
    }
}
