use crate::error::{Result, WordRole, WordleError};
use crate::feedback::Evaluation;
use crate::info_log;
use crate::session::{AssistSession, BoardRow, GameSession, GuessOutcome, SessionState};
use crate::word::{Dictionary, Word};
use rand::Rng;

/// What the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Search,
    NewGame,
    Exit,
}

/// Answer to a feedback prompt in assist mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackInput {
    Marked(Evaluation),
    /// Nothing usable was entered; go back to reading actions
    Retry,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Play,
    Assist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeInfo {
    pub mode: LoopMode,
    pub word_count: usize,
}

/// Trait for UI implementations (CLI or TUI).
/// This abstraction separates game logic from I/O.
pub trait GameInterface {
    fn display_welcome(&mut self, info: &WelcomeInfo);

    /// `None` when the input was not actionable and should be asked again.
    fn read_action(&mut self) -> Option<UserAction>;

    fn read_feedback(&mut self, guess: &Word) -> FeedbackInput;

    fn display_outcome(&mut self, outcome: &GuessOutcome, board: &[BoardRow]);

    fn display_candidates(&mut self, candidates: &[Word]);

    fn display_error(&mut self, message: &str);

    fn display_solution_found(&mut self, solution: &Word);

    fn display_no_candidates_message(&mut self);

    fn display_new_game_message(&mut self, word_count: usize);

    /// `answer` is set when an unsolved game is abandoned.
    fn display_exit_message(&mut self, answer: Option<&Word>);
}

/// Play games against hidden answers until the player exits. The first
/// game uses `answer` when given; later games draw from `rng`.
pub fn play_loop<I, R>(
    dictionary: &Dictionary,
    answer: Option<&str>,
    rng: &mut R,
    interface: &mut I,
) -> Result<()>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut session = GameSession::new(dictionary.clone(), answer, rng)?;
    interface.display_welcome(&WelcomeInfo {
        mode: LoopMode::Play,
        word_count: session.dictionary().len(),
    });

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };

        match action {
            UserAction::Exit => {
                let unsolved = session.state() != SessionState::Won;
                interface.display_exit_message(unsolved.then_some(session.answer()));
                break;
            }
            UserAction::NewGame => {
                session = GameSession::new(dictionary.clone(), None, rng)?;
                interface.display_new_game_message(session.dictionary().len());
            }
            UserAction::Search => {
                let candidates: Vec<Word> = session.search().into_iter().collect();
                interface.display_candidates(&candidates);
            }
            UserAction::Guess(text) => match session.guess(&text) {
                Ok(outcome) => {
                    if outcome.won {
                        info_log!("Solved in {} guesses", session.history().len());
                    }
                    interface.display_outcome(&outcome, &session.board());
                }
                Err(e) => interface.display_error(&e.to_string()),
            },
        }
    }
    Ok(())
}

/// Narrow the candidates of a game played elsewhere from the feedback the
/// player enters for each guess.
pub fn assist_loop<I>(dictionary: &Dictionary, interface: &mut I)
where
    I: GameInterface + ?Sized,
{
    let mut assist = AssistSession::new(dictionary.clone());
    interface.display_welcome(&WelcomeInfo {
        mode: LoopMode::Assist,
        word_count: assist.dictionary().len(),
    });

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };

        let text = match action {
            UserAction::Exit => {
                interface.display_exit_message(None);
                break;
            }
            UserAction::NewGame => {
                assist.reset();
                interface.display_new_game_message(assist.dictionary().len());
                continue;
            }
            UserAction::Search => {
                let candidates: Vec<Word> = assist.search().into_iter().collect();
                interface.display_candidates(&candidates);
                continue;
            }
            UserAction::Guess(text) => text,
        };

        let Some(guess) = Word::parse(&text) else {
            let err = WordleError::invalid_length(WordRole::Guess, &text);
            interface.display_error(&err.to_string());
            continue;
        };

        let feedback = match interface.read_feedback(&guess) {
            FeedbackInput::Marked(feedback) => feedback,
            FeedbackInput::Retry => continue,
            FeedbackInput::Exit => {
                interface.display_exit_message(None);
                break;
            }
        };

        assist.record(guess, feedback);
        let candidates: Vec<Word> = assist.search().into_iter().collect();
        interface.display_candidates(&candidates);

        if feedback.is_win() {
            interface.display_solution_found(&guess);
        } else {
            match candidates.as_slice() {
                [] => interface.display_no_candidates_message(),
                [only] => interface.display_solution_found(only),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    /// Scripted interface recording what the loops show.
    #[derive(Default)]
    struct Script {
        actions: VecDeque<Option<UserAction>>,
        feedback: VecDeque<FeedbackInput>,
        events: Vec<String>,
    }

    impl Script {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                ..Self::default()
            }
        }
    }

    fn guess(text: &str) -> Option<UserAction> {
        Some(UserAction::Guess(text.to_string()))
    }

    impl GameInterface for Script {
        fn display_welcome(&mut self, info: &WelcomeInfo) {
            self.events.push(format!("welcome {}", info.word_count));
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn read_feedback(&mut self, _guess: &Word) -> FeedbackInput {
            self.feedback.pop_front().unwrap_or(FeedbackInput::Exit)
        }

        fn display_outcome(&mut self, outcome: &GuessOutcome, board: &[BoardRow]) {
            self.events.push(format!(
                "outcome {} {} {} rows={}",
                outcome.guess,
                outcome.in_dictionary,
                outcome.won,
                board.len()
            ));
        }

        fn display_candidates(&mut self, candidates: &[Word]) {
            let words: Vec<String> = candidates.iter().map(ToString::to_string).collect();
            self.events.push(format!("candidates {}", words.join(",")));
        }

        fn display_error(&mut self, message: &str) {
            self.events.push(format!("error {message}"));
        }

        fn display_solution_found(&mut self, solution: &Word) {
            self.events.push(format!("solved {solution}"));
        }

        fn display_no_candidates_message(&mut self) {
            self.events.push("no candidates".to_string());
        }

        fn display_new_game_message(&mut self, word_count: usize) {
            self.events.push(format!("new game {word_count}"));
        }

        fn display_exit_message(&mut self, answer: Option<&Word>) {
            match answer {
                Some(answer) => self.events.push(format!("exit {answer}")),
                None => self.events.push("exit".to_string()),
            }
        }
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_tokens(["CRANE", "SLATE", "TRACE", "GRAPE"])
    }

    #[test]
    fn test_play_loop_win() {
        let mut script = Script::new(vec![guess("slate"), guess("crane"), Some(UserAction::Exit)]);
        let mut rng = StdRng::seed_from_u64(1);
        play_loop(&dictionary(), Some("CRANE"), &mut rng, &mut script).unwrap();
        assert_eq!(
            script.events,
            vec![
                "welcome 4",
                "outcome SLATE true false rows=1",
                "outcome CRANE true true rows=2",
                "exit",
            ]
        );
    }

    #[test]
    fn test_play_loop_search_and_errors() {
        let mut script = Script::new(vec![
            None,
            guess("cran"),
            guess("xxxxx"),
            Some(UserAction::Search),
            guess("slate"),
            Some(UserAction::Search),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        play_loop(&dictionary(), Some("CRANE"), &mut rng, &mut script).unwrap();
        assert_eq!(
            script.events,
            vec![
                "welcome 4",
                "error guess \"cran\" must have 5 characters, not 4",
                "outcome XXXXX false false rows=0",
                "candidates CRANE,GRAPE,SLATE,TRACE",
                "outcome SLATE true false rows=1",
                "candidates CRANE,GRAPE",
                "exit CRANE",
            ]
        );
    }

    #[test]
    fn test_play_loop_new_game() {
        let mut script = Script::new(vec![
            guess("slate"),
            Some(UserAction::NewGame),
            Some(UserAction::Search),
        ]);
        let mut rng = StdRng::seed_from_u64(5);
        play_loop(&dictionary(), Some("CRANE"), &mut rng, &mut script).unwrap();
        assert_eq!(script.events[2], "new game 4");
        assert_eq!(script.events[3], "candidates CRANE,GRAPE,SLATE,TRACE");
    }

    #[test]
    fn test_play_loop_invalid_answer() {
        let mut script = Script::new(vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = play_loop(&dictionary(), Some("CRANES"), &mut rng, &mut script).unwrap_err();
        assert!(err.is_invalid_length());
        assert!(script.events.is_empty());
    }

    #[test]
    fn test_assist_loop_solves() {
        let mut script = Script::new(vec![guess("slate"), guess("grape")]);
        script.feedback = vec![
            FeedbackInput::Marked(Evaluation::parse("XXGXG").unwrap()),
            FeedbackInput::Marked(Evaluation::parse("XGGXG").unwrap()),
        ]
        .into();
        assist_loop(&dictionary(), &mut script);
        assert_eq!(
            script.events,
            vec![
                "welcome 4",
                "candidates CRANE,GRAPE",
                "candidates CRANE",
                "solved CRANE",
                "exit",
            ]
        );
    }

    #[test]
    fn test_assist_loop_inconsistent_feedback() {
        let mut script = Script::new(vec![guess("crane"), guess("slate")]);
        script.feedback = vec![
            FeedbackInput::Marked(Evaluation::parse("XXXXX").unwrap()),
            FeedbackInput::Marked(Evaluation::parse("XXXXG").unwrap()),
        ]
        .into();
        assist_loop(&dictionary(), &mut script);
        assert!(script.events.contains(&"no candidates".to_string()));
    }

    #[test]
    fn test_assist_loop_retry_and_bad_guess() {
        let mut script = Script::new(vec![
            guess("toolong"),
            guess("crane"),
            Some(UserAction::NewGame),
        ]);
        script.feedback = vec![FeedbackInput::Retry].into();
        assist_loop(&dictionary(), &mut script);
        assert_eq!(
            script.events,
            vec![
                "welcome 4",
                "error guess \"toolong\" must have 5 characters, not 7",
                "new game 4",
                "exit",
            ]
        );
    }
}
