//! Character membership sets.
//!
//! Language definitions test every scanned character against a handful of
//! sets (operators, punctuation, keyword start/continue). Latin-1 members
//! live in a 256-bit table; anything wider goes to a hash set.

use std::fmt;

use rustc_hash::FxHashSet;

/// A set of characters with constant-time membership.
///
/// # Examples
///
/// ```
/// use tinct_util::CharSet;
///
/// let ops: CharSet = "+-*/=".chars().collect();
/// assert!(ops.contains('+'));
/// assert!(!ops.contains('a'));
/// assert_eq!(ops.to_string(), "*+-/=");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    latin1: [u64; 4],
    wide: FxHashSet<char>,
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `ch`; returns true if it was not already present.
    pub fn insert(&mut self, ch: char) -> bool {
        match latin1_slot(ch) {
            Some((word, bit)) => {
                let present = self.latin1[word] & bit != 0;
                self.latin1[word] |= bit;
                !present
            },
            None => self.wide.insert(ch),
        }
    }

    /// Removes `ch`; returns true if it was present.
    pub fn remove(&mut self, ch: char) -> bool {
        match latin1_slot(ch) {
            Some((word, bit)) => {
                let present = self.latin1[word] & bit != 0;
                self.latin1[word] &= !bit;
                present
            },
            None => self.wide.remove(&ch),
        }
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        match latin1_slot(ch) {
            Some((word, bit)) => self.latin1[word] & bit != 0,
            None => self.wide.contains(&ch),
        }
    }

    pub fn len(&self) -> usize {
        let narrow: u32 = self.latin1.iter().map(|w| w.count_ones()).sum();
        narrow as usize + self.wide.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latin1.iter().all(|&w| w == 0) && self.wide.is_empty()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        let narrow = (0u32..256)
            .filter(|&c| self.latin1[(c / 64) as usize] & (1u64 << (c % 64)) != 0)
            .filter_map(char::from_u32);
        let mut wide: Vec<char> = self.wide.iter().copied().collect();
        wide.sort_unstable();
        narrow.chain(wide)
    }
}

#[inline]
fn latin1_slot(ch: char) -> Option<(usize, u64)> {
    let c = ch as u32;
    (c < 256).then(|| ((c / 64) as usize, 1u64 << (c % 64)))
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = CharSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<char> for CharSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for ch in iter {
            self.insert(ch);
        }
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.iter() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharSet({:?})", self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_insert_remove() {
        let mut set = CharSet::new();
        assert!(set.is_empty());
        assert!(set.insert('+'));
        assert!(!set.insert('+'));
        assert!(set.insert('λ'));
        assert_eq!(set.len(), 2);
        assert!(set.remove('λ'));
        assert!(!set.remove('λ'));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_latin1_edges() {
        let set: CharSet = ['\0', '\u{3F}', '\u{40}', '\u{FF}', '\u{100}'].into_iter().collect();
        assert!(set.contains('\0'));
        assert!(set.contains('\u{FF}'));
        assert!(set.contains('\u{100}'));
        assert!(!set.contains('\u{FE}'));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_iter_sorted() {
        let set: CharSet = "zλa→".chars().collect();
        assert_eq!(set.iter().collect::<String>(), "azλ→");
    }

    #[test]
    fn test_debug() {
        let set: CharSet = "()".chars().collect();
        assert_eq!(format!("{:?}", set), "CharSet(\"()\")");
    }

    #[quickcheck]
    fn prop_contains_exactly_inserted(chars: Vec<char>, probe: char) -> bool {
        let set: CharSet = chars.iter().copied().collect();
        set.contains(probe) == chars.contains(&probe)
    }

    #[quickcheck]
    fn prop_len_matches_distinct(chars: Vec<char>) -> bool {
        let set: CharSet = chars.iter().copied().collect();
        let distinct: FxHashSet<char> = chars.into_iter().collect();
        set.len() == distinct.len()
    }

    #[quickcheck]
    fn prop_display_reparses_to_same_set(chars: Vec<char>) -> bool {
        let set: CharSet = chars.into_iter().collect();
        let again: CharSet = set.to_string().chars().collect();
        again == set
    }
}
