//! Sorted character tables.
//!
//! An [`Alphabet`] is the character-class primitive every lexer in the
//! workspace is built from: separators, delimiter-break characters, hex
//! digits, patch-name characters and so on. Tables are built once, sorted,
//! and then only ever queried.

use std::fmt;

/// An immutable, sorted set of characters queried by binary search.
///
/// # Example
///
/// ```
/// use dtk_util::Alphabet;
///
/// let separators = Alphabet::new("{}()");
/// assert!(separators.contains('{'));
/// assert!(!separators.contains('['));
/// assert_eq!(separators.len(), 4);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    chars: Box<[char]>,
}

impl Alphabet {
    /// Builds an alphabet from every character of `source`.
    ///
    /// Duplicates are collapsed so that [`Alphabet::len`] counts distinct
    /// characters.
    pub fn new(source: &str) -> Self {
        source.chars().collect()
    }

    /// Returns `true` if `c` belongs to this alphabet.
    ///
    /// Runs in `O(log n)`.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.chars.binary_search(&c).is_ok()
    }

    /// Number of distinct characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the alphabet has no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters in ascending order.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Iterates over the characters in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut chars: Vec<char> = iter.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        Self {
            chars: chars.into_boxed_slice(),
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.chars.iter().collect();
        f.debug_tuple("Alphabet").field(&text).finish()
    }
}
