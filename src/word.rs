use rand::Rng;
use rand::seq::IteratorRandom;
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;

pub const WORD_LENGTH: usize = 5;

/// A five-character, upper-case word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([char; WORD_LENGTH]);

impl Word {
    /// Parse and normalise `text`. Returns `None` unless it has exactly
    /// five characters.
    pub fn parse(text: &str) -> Option<Self> {
        let mut letters = [' '; WORD_LENGTH];
        let mut chars = text.chars();
        for slot in &mut letters {
            *slot = normalize(chars.next()?);
        }
        if chars.next().is_some() {
            return None;
        }
        Some(Self(letters))
    }

    pub fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.0
    }

    pub fn letter(&self, index: usize) -> char {
        self.0[index]
    }

    /// Number of occurrences of `letter`.
    pub fn count(&self, letter: char) -> u8 {
        let mut n = 0;
        for &c in &self.0 {
            if c == letter {
                n += 1;
            }
        }
        n
    }
}

// Letters whose upper-case form expands (e.g. 'ß') are kept as-is so the
// word length never changes.
fn normalize(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self})")
    }
}

/// The set of words a session accepts as evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: BTreeSet<Word>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw tokens, keeping only those of length five.
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens.into_iter().filter_map(Word::parse).collect()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Word> {
        self.words.iter()
    }

    pub(crate) fn insert(&mut self, word: Word) -> bool {
        self.words.insert(word)
    }

    /// Pick a word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Word> {
        self.words.iter().choose(rng).copied()
    }
}

impl FromIterator<Word> for Dictionary {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a Word;
    type IntoIter = btree_set::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
