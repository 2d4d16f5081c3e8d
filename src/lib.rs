// Library interface for the wordle game
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod render;
pub mod session;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{ConstraintSet, LetterBounds, candidates, candidates_from_evidence};
pub use error::{Result, WordRole, WordleError};
pub use feedback::{Evaluation, LetterFeedback, evaluate};
pub use game_state::{assist_loop, play_loop};
pub use session::{AssistSession, GameSession, GuessOutcome, SessionState};
pub use word::{Dictionary, WORD_LENGTH, Word};
pub use wordbank::{load_dictionary, load_wordbank_from_file, load_wordbank_from_str};
