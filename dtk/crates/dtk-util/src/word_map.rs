//! Immutable word tables.
//!
//! A [`WordMap`] maps the literal text of a word (keyword, literal constant,
//! section header) to a token kind. Each language builds exactly one map,
//! once, and only reads from it afterwards.

use std::borrow::Cow;

use rustc_hash::FxHashMap;

/// How a [`WordMap`] compares words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CasePolicy {
    /// `While` and `while` are different words.
    Sensitive,
    /// ASCII letters are folded before lookup.
    #[default]
    Insensitive,
}

impl CasePolicy {
    fn fold<'a>(self, word: &'a str) -> Cow<'a, str> {
        match self {
            CasePolicy::Insensitive if word.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(word.to_ascii_lowercase())
            },
            _ => Cow::Borrowed(word),
        }
    }
}

/// A read-only dictionary from word text to a kind.
///
/// # Example
///
/// ```
/// use dtk_util::{CasePolicy, WordMap};
///
/// let words = WordMap::build(CasePolicy::Insensitive, [("while", 1u8), ("true", 2)]);
/// assert_eq!(words.get("WHILE"), Some(1));
/// assert_eq!(words.get("True"), Some(2));
/// assert_eq!(words.get("whilst"), None);
/// ```
#[derive(Debug, Clone)]
pub struct WordMap<K> {
    policy: CasePolicy,
    words: FxHashMap<Box<str>, K>,
}

impl<K: Copy> WordMap<K> {
    /// Builds a map from `(word, kind)` pairs.
    ///
    /// When the same word (after case folding) appears twice the later
    /// entry wins.
    pub fn build<'a, I>(policy: CasePolicy, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, K)>,
    {
        let mut words = FxHashMap::default();
        for (word, kind) in entries {
            words.insert(policy.fold(word).into_owned().into_boxed_str(), kind);
        }
        Self { policy, words }
    }

    /// An empty map, for languages without reserved words.
    pub fn empty(policy: CasePolicy) -> Self {
        Self {
            policy,
            words: FxHashMap::default(),
        }
    }

    /// Looks up `word` under this map's case policy.
    #[inline]
    pub fn get(&self, word: &str) -> Option<K> {
        if self.words.is_empty() {
            return None;
        }
        self.words.get(self.policy.fold(word).as_ref()).copied()
    }

    /// Returns `true` if `word` is present.
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// The case policy the map was built with.
    pub fn policy(&self) -> CasePolicy {
        self.policy
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the map has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the stored (folded) words and their kinds in no
    /// particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, K)> + '_ {
        self.words.iter().map(|(word, kind)| (word.as_ref(), *kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Reserved,
        Boolean,
    }

    #[test]
    fn test_insensitive_lookup() {
        let map = WordMap::build(
            CasePolicy::Insensitive,
            [("if", Kind::Reserved), ("TRUE", Kind::Boolean)],
        );
        assert_eq!(map.get("IF"), Some(Kind::Reserved));
        assert_eq!(map.get("If"), Some(Kind::Reserved));
        assert_eq!(map.get("true"), Some(Kind::Boolean));
        assert_eq!(map.get("iff"), None);
    }

    #[test]
    fn test_sensitive_lookup() {
        let map = WordMap::build(CasePolicy::Sensitive, [("END", Kind::Reserved)]);
        assert_eq!(map.get("END"), Some(Kind::Reserved));
        assert_eq!(map.get("end"), None);
    }

    #[test]
    fn test_later_entry_wins() {
        let map = WordMap::build(
            CasePolicy::Insensitive,
            [("null", Kind::Reserved), ("NULL", Kind::Boolean)],
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("null"), Some(Kind::Boolean));
    }

    #[test]
    fn test_empty_map() {
        let map: WordMap<Kind> = WordMap::empty(CasePolicy::Insensitive);
        assert!(map.is_empty());
        assert!(!map.contains("anything"));
    }

    #[test]
    fn test_non_ascii_words_untouched() {
        let map = WordMap::build(CasePolicy::Insensitive, [("ÉTAT", Kind::Reserved)]);
        assert!(!map.contains("éTAT"));
        assert!(map.contains("ÉtAt"));
    }

    #[test]
    fn test_iter_yields_folded_words() {
        let map = WordMap::build(CasePolicy::Insensitive, [("[SWITCHES]", Kind::Reserved)]);
        let words: Vec<_> = map.iter().collect();
        assert_eq!(words, vec![("[switches]", Kind::Reserved)]);
    }
}
