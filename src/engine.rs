use crate::feedback::{Evaluation, LetterFeedback, evaluate};
use crate::word::{Dictionary, WORD_LENGTH, Word};
use std::collections::{BTreeMap, BTreeSet};

/// How many times a letter may occur in the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterBounds {
    pub min: u8,
    /// `Some` once the letter's count has been fully revealed.
    pub max: Option<u8>,
}

impl LetterBounds {
    pub fn admits(&self, count: u8) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    pub fn is_exact(&self) -> bool {
        self.max == Some(self.min)
    }
}

/// Everything the accumulated feedback says about the answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    exact: [Option<char>; WORD_LENGTH],
    letters: BTreeMap<char, LetterBounds>,
    contradictory: bool,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold (guess, feedback) pairs into a constraint set.
    pub fn from_evidence<'a, I>(evidence: I) -> Self
    where
        I: IntoIterator<Item = (&'a Word, &'a Evaluation)>,
    {
        let mut constraints = Self::new();
        for (guess, feedback) in evidence {
            constraints.observe(guess, feedback);
        }
        constraints
    }

    /// Add the constraints implied by one guess and its feedback.
    pub fn observe(&mut self, guess: &Word, feedback: &Evaluation) {
        for i in 0..WORD_LENGTH {
            if feedback.get(i) != LetterFeedback::Exact {
                continue;
            }
            let letter = guess.letter(i);
            match self.exact[i] {
                Some(required) if required != letter => self.contradictory = true,
                _ => self.exact[i] = Some(letter),
            }
        }

        let mut seen: Vec<char> = Vec::with_capacity(WORD_LENGTH);
        for &letter in guess.letters() {
            if seen.contains(&letter) {
                continue;
            }
            seen.push(letter);

            let mut hits = 0;
            let mut misses = 0;
            for (i, _) in guess.letters().iter().enumerate().filter(|&(_, &c)| c == letter) {
                if feedback.get(i).is_hit() {
                    hits += 1;
                } else {
                    misses += 1;
                }
            }

            let bounds = self.letters.entry(letter).or_insert(LetterBounds { min: 0, max: None });
            bounds.min = bounds.min.max(hits);
            // An absent copy means every copy in the answer was located
            if misses > 0 {
                bounds.max = Some(bounds.max.map_or(hits, |max| max.min(hits)));
            }
            if bounds.max.is_some_and(|max| max < bounds.min) {
                self.contradictory = true;
            }
        }
    }

    pub fn exact_at(&self, index: usize) -> Option<char> {
        self.exact[index]
    }

    pub fn bounds(&self, letter: char) -> Option<LetterBounds> {
        self.letters.get(&letter).copied()
    }

    /// True when no word can satisfy the constraints.
    pub fn is_contradictory(&self) -> bool {
        self.contradictory
    }

    pub fn matches(&self, word: &Word) -> bool {
        if self.contradictory {
            return false;
        }
        for (i, required) in self.exact.iter().enumerate() {
            if let Some(letter) = required {
                if word.letter(i) != *letter {
                    return false;
                }
            }
        }
        self.letters
            .iter()
            .all(|(&letter, bounds)| bounds.admits(word.count(letter)))
    }

    pub fn filter(&self, dictionary: &Dictionary) -> BTreeSet<Word> {
        dictionary
            .iter()
            .filter(|word| self.matches(word))
            .copied()
            .collect()
    }
}

/// Dictionary words consistent with the feedback every guess in `history`
/// produced against `answer`.
pub fn candidates(history: &[Word], answer: &Word, dictionary: &Dictionary) -> BTreeSet<Word> {
    let mut constraints = ConstraintSet::new();
    for guess in history {
        constraints.observe(guess, &evaluate(guess, answer));
    }
    constraints.filter(dictionary)
}

/// Same as [`candidates`] for callers that only hold the feedback.
pub fn candidates_from_evidence(
    evidence: &[(Word, Evaluation)],
    dictionary: &Dictionary,
) -> BTreeSet<Word> {
    ConstraintSet::from_evidence(evidence.iter().map(|(guess, feedback)| (guess, feedback)))
        .filter(dictionary)
}
