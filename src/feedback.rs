//! Per-letter feedback for a guess against the answer.
//!
//! Exact matches are resolved first, then the remaining positions are
//! scanned left to right, each consuming one unused occurrence of its
//! letter in the answer. A letter never earns more Exact/Present marks
//! than it has occurrences in the answer.

use crate::word::{WORD_LENGTH, Word};
use std::fmt;

/// Feedback for a single position of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterFeedback {
    /// Right letter, right position (green)
    Exact,
    /// Letter occurs elsewhere in the answer (yellow)
    Present,
    /// No unaccounted occurrence of the letter (gray)
    Absent,
}

impl LetterFeedback {
    /// Parse a feedback code. G = exact, Y = present, X/B/-/. = absent.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Exact),
            'Y' => Some(Self::Present),
            'X' | 'B' | '-' | '.' => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }

    /// Whether the letter was located in the answer.
    pub fn is_hit(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Feedback for a whole guess, aligned with its positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluation([LetterFeedback; WORD_LENGTH]);

impl Evaluation {
    pub const WIN: Self = Self([LetterFeedback::Exact; WORD_LENGTH]);

    pub fn new(feedback: [LetterFeedback; WORD_LENGTH]) -> Self {
        Self(feedback)
    }

    /// Parse codes such as `GYXXG`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut feedback = [LetterFeedback::Absent; WORD_LENGTH];
        let mut chars = text.trim().chars();
        for slot in &mut feedback {
            *slot = LetterFeedback::from_char(chars.next()?)?;
        }
        if chars.next().is_some() {
            return None;
        }
        Some(Self(feedback))
    }

    pub fn is_win(&self) -> bool {
        *self == Self::WIN
    }

    pub fn get(&self, index: usize) -> LetterFeedback {
        self.0[index]
    }

    pub fn as_array(&self) -> &[LetterFeedback; WORD_LENGTH] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = LetterFeedback> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feedback in self.0 {
            write!(f, "{}", feedback.to_char())?;
        }
        Ok(())
    }
}

/// Compute the feedback for `guess` against `answer`.
pub fn evaluate(guess: &Word, answer: &Word) -> Evaluation {
    let mut feedback = [LetterFeedback::Absent; WORD_LENGTH];
    let mut unconsumed: [Option<char>; WORD_LENGTH] = answer.letters().map(Some);

    // First pass: exact matches
    for i in 0..WORD_LENGTH {
        if guess.letter(i) == answer.letter(i) {
            feedback[i] = LetterFeedback::Exact;
            unconsumed[i] = None;
        }
    }

    // Second pass: misplaced letters, left to right
    for i in 0..WORD_LENGTH {
        if feedback[i] == LetterFeedback::Exact {
            continue;
        }
        let letter = guess.letter(i);
        if let Some(slot) = unconsumed.iter_mut().find(|slot| **slot == Some(letter)) {
            *slot = None;
            feedback[i] = LetterFeedback::Present;
        }
    }

    Evaluation(feedback)
}
