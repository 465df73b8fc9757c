use rustc_hash::FxHashMap;

use crate::mode::{Direction, Mode};
use crate::tables;

/// Per-call union of the static tables selected by a [`Mode`].
///
/// Built by [`select`], owned by a single conversion and dropped afterwards.
/// Lookups return `None` for characters outside every selected table; the
/// caller decides the fallback.
#[derive(Debug, Default)]
pub struct MergedDict {
    map: FxHashMap<&'static str, &'static str>,
}

impl MergedDict {
    #[inline]
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.map.get(key).copied()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Composes the merged mapping for `direction` from every category whose bit
/// is set in `mode`, in union order (ASCII, DIGIT, KANA).
///
/// Earlier categories win on a key collision. The shipped tables are disjoint,
/// so in practice the union order never matters.
///
/// ```
/// use zenhan::{selector, Direction, Mode};
///
/// let dict = selector::select(Direction::H2z, Mode::DIGIT | Mode::KANA);
/// assert_eq!(dict.get("7"), Some("７"));
/// assert_eq!(dict.get("ｶﾞ"), Some("ガ"));
/// assert_eq!(dict.get("a"), None);
///
/// assert!(selector::select(Direction::Z2h, Mode::NONE).is_empty());
/// ```
pub fn select(direction: Direction, mode: Mode) -> MergedDict {
    let mut map: FxHashMap<&'static str, &'static str> = FxHashMap::default();
    map.reserve(
        mode.categories()
            .map(|c| tables::table(c, direction).len())
            .sum(),
    );

    for category in mode.categories() {
        for (&key, &value) in tables::table(category, direction) {
            map.entry(key).or_insert(value);
        }
    }

    MergedDict { map }
}
