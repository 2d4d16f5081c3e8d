use crate::engine::{candidates, candidates_from_evidence};
use crate::error::{Result, WordRole, WordleError};
use crate::feedback::{Evaluation, evaluate};
use crate::word::{Dictionary, Word};
use crate::{debug_log, info_log};
use rand::Rng;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    /// Terminal once a guess equals the answer
    Won,
}

/// Result of a single guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub guess: Word,
    pub feedback: Evaluation,
    pub in_dictionary: bool,
    pub won: bool,
}

/// A recorded guess with the feedback it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    pub word: Word,
    pub feedback: Evaluation,
}

/// One game: a hidden answer, the dictionary, and the guesses so far.
#[derive(Debug, Clone)]
pub struct GameSession {
    answer: Word,
    dictionary: Dictionary,
    history: Vec<Word>,
    state: SessionState,
}

impl GameSession {
    /// Start a game. Without an `answer`, one is drawn from the dictionary
    /// with `rng`. A supplied answer is added to the dictionary so it can
    /// always be found by [`search`](Self::search).
    pub fn new<R: Rng + ?Sized>(
        mut dictionary: Dictionary,
        answer: Option<&str>,
        rng: &mut R,
    ) -> Result<Self> {
        let answer = match answer {
            Some(text) => {
                let word = Word::parse(text)
                    .ok_or_else(|| WordleError::invalid_length(WordRole::Answer, text))?;
                dictionary.insert(word);
                word
            }
            None => dictionary.choose(rng).ok_or(WordleError::EmptyDictionary)?,
        };
        info_log!("New game with {} dictionary words", dictionary.len());

        Ok(Self {
            answer,
            dictionary,
            history: Vec::new(),
            state: SessionState::InProgress,
        })
    }

    /// Start a game with a known answer.
    pub fn with_answer(dictionary: Dictionary, answer: &str) -> Result<Self> {
        Self::new(dictionary, Some(answer), &mut rand::rng())
    }

    pub fn guess(&mut self, text: &str) -> Result<GuessOutcome> {
        let guess =
            Word::parse(text).ok_or_else(|| WordleError::invalid_length(WordRole::Guess, text))?;
        let feedback = evaluate(&guess, &self.answer);
        let in_dictionary = self.dictionary.contains(&guess);
        if in_dictionary {
            self.history.push(guess);
        }
        let won = guess == self.answer;
        if won {
            self.state = SessionState::Won;
        }
        debug_log!(
            "guess {} -> {} (in dictionary: {}, won: {})",
            guess,
            feedback,
            in_dictionary,
            won
        );

        Ok(GuessOutcome {
            guess,
            feedback,
            in_dictionary,
            won,
        })
    }

    /// Every dictionary word still consistent with the recorded guesses.
    pub fn search(&self) -> BTreeSet<Word> {
        candidates(&self.history, &self.answer, &self.dictionary)
    }

    pub fn history(&self) -> &[Word] {
        &self.history
    }

    /// The recorded guesses with their feedback, oldest first.
    pub fn board(&self) -> Vec<BoardRow> {
        self.history
            .iter()
            .map(|word| BoardRow {
                word: *word,
                feedback: evaluate(word, &self.answer),
            })
            .collect()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn answer(&self) -> &Word {
        &self.answer
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

/// Narrows candidates for a game whose answer is unknown, from feedback
/// the player copies over.
#[derive(Debug, Clone)]
pub struct AssistSession {
    dictionary: Dictionary,
    evidence: Vec<(Word, Evaluation)>,
}

impl AssistSession {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            evidence: Vec::new(),
        }
    }

    pub fn record(&mut self, guess: Word, feedback: Evaluation) {
        debug_log!("assist evidence {} -> {}", guess, feedback);
        self.evidence.push((guess, feedback));
    }

    pub fn search(&self) -> BTreeSet<Word> {
        candidates_from_evidence(&self.evidence, &self.dictionary)
    }

    pub fn reset(&mut self) {
        self.evidence.clear();
    }

    pub fn evidence(&self) -> &[(Word, Evaluation)] {
        &self.evidence
    }

    pub fn board(&self) -> Vec<BoardRow> {
        self.evidence
            .iter()
            .map(|&(word, feedback)| BoardRow { word, feedback })
            .collect()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::LetterFeedback::{Absent, Exact};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dictionary() -> Dictionary {
        Dictionary::from_tokens(["CRANE", "SLATE", "TRACE", "GRAPE"])
    }

    fn w(text: &str) -> Word {
        Word::parse(text).unwrap()
    }

    #[test]
    fn test_guess_in_dictionary_is_recorded() {
        let mut session = GameSession::with_answer(dictionary(), "crane").unwrap();
        let outcome = session.guess("slate").unwrap();
        assert_eq!(outcome.guess, w("SLATE"));
        assert!(outcome.in_dictionary);
        assert!(!outcome.won);
        assert_eq!(
            *outcome.feedback.as_array(),
            [Absent, Absent, Exact, Absent, Exact]
        );
        assert_eq!(session.history(), &[w("SLATE")]);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn test_winning_guess() {
        let mut session = GameSession::with_answer(dictionary(), "CRANE").unwrap();
        let outcome = session.guess("CRANE").unwrap();
        assert!(outcome.won);
        assert!(outcome.feedback.is_win());
        assert_eq!(session.state(), SessionState::Won);

        // Won is terminal
        session.guess("SLATE").unwrap();
        assert_eq!(session.state(), SessionState::Won);
        assert!(session.search().contains(&w("CRANE")));
    }

    #[test]
    fn test_wrong_length_guess_is_rejected_without_mutation() {
        let mut session = GameSession::with_answer(dictionary(), "CRANE").unwrap();
        session.guess("SLATE").unwrap();
        let before = session.search();

        let err = session.guess("CRAN").unwrap_err();
        assert!(err.is_invalid_length());
        assert!(session.guess("CRANES").is_err());

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.search(), before);
    }

    #[test]
    fn test_non_dictionary_guess_is_evaluated_but_not_recorded() {
        let mut session = GameSession::with_answer(dictionary(), "CRANE").unwrap();
        let before = session.search();
        let outcome = session.guess("CRONE").unwrap();
        assert!(!outcome.in_dictionary);
        assert!(!outcome.won);
        assert_eq!(outcome.feedback.to_string(), "GGXGG");
        assert!(session.history().is_empty());
        assert_eq!(session.search(), before);
    }

    #[test]
    fn test_search_before_guesses_is_whole_dictionary() {
        let session = GameSession::with_answer(dictionary(), "CRANE").unwrap();
        assert_eq!(session.search().len(), 4);
    }

    #[test]
    fn test_search_is_idempotent() {
        let mut session = GameSession::with_answer(dictionary(), "CRANE").unwrap();
        session.guess("GRAPE").unwrap();
        assert_eq!(session.search(), session.search());
    }

    #[test]
    fn test_supplied_answer_joins_dictionary() {
        let session = GameSession::with_answer(dictionary(), "BRAKE").unwrap();
        assert_eq!(session.dictionary().len(), 5);
        assert!(session.search().contains(&w("BRAKE")));
    }

    #[test]
    fn test_invalid_answer_length() {
        let err = GameSession::with_answer(dictionary(), "CRANES").unwrap_err();
        match err {
            WordleError::InvalidLength { role, length, .. } => {
                assert_eq!(role, WordRole::Answer);
                assert_eq!(length, 6);
            }
            other => panic!("Expected InvalidLength, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_dictionary_without_answer() {
        let err = GameSession::new(Dictionary::new(), None, &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, WordleError::EmptyDictionary));
    }

    #[test]
    fn test_empty_dictionary_with_answer() {
        let session = GameSession::with_answer(Dictionary::new(), "CRANE").unwrap();
        assert_eq!(session.search().len(), 1);
    }

    #[test]
    fn test_seeded_answer_is_reproducible() {
        let a = GameSession::new(dictionary(), None, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = GameSession::new(dictionary(), None, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.answer(), b.answer());
        assert!(dictionary().contains(a.answer()));
    }

    #[test]
    fn test_board_follows_history() {
        let mut session = GameSession::with_answer(dictionary(), "CRANE").unwrap();
        session.guess("SLATE").unwrap();
        session.guess("XXXXX").unwrap();
        session.guess("TRACE").unwrap();
        let board = session.board();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].word, w("SLATE"));
        assert_eq!(board[1].word, w("TRACE"));
        assert_eq!(board[1].feedback, evaluate(&w("TRACE"), &w("CRANE")));
    }

    #[test]
    fn test_assist_session_narrows_from_feedback() {
        let mut assist = AssistSession::new(dictionary());
        assert_eq!(assist.search().len(), 4);
        assist.record(w("SLATE"), Evaluation::parse("XXGXG").unwrap());
        let result = assist.search();
        assert!(result.contains(&w("CRANE")));
        assert!(result.contains(&w("GRAPE")));
        assert!(!result.contains(&w("TRACE")));
        assert_eq!(assist.board().len(), 1);

        assist.reset();
        assert!(assist.evidence().is_empty());
        assert_eq!(assist.search().len(), 4);
    }
}
