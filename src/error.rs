use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which kind of word failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRole {
    Answer,
    Guess,
}

impl fmt::Display for WordRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Answer => f.write_str("answer"),
            Self::Guess => f.write_str("guess"),
        }
    }
}

/// Errors reported by the game engine and its loaders.
#[derive(Debug, Error)]
pub enum WordleError {
    /// An answer or guess was not exactly five characters long
    #[error("{role} {word:?} must have 5 characters, not {length}")]
    InvalidLength {
        role: WordRole,
        word: String,
        length: usize,
    },

    /// No answer was supplied and there is nothing to draw one from
    #[error("dictionary has no 5-letter words to choose an answer from")]
    EmptyDictionary,

    /// The word list could not be read
    #[error("failed to read dictionary {}: {source}", path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal setup or teardown failed
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl WordleError {
    pub fn invalid_length(role: WordRole, word: &str) -> Self {
        Self::InvalidLength {
            role,
            word: word.to_string(),
            length: word.chars().count(),
        }
    }

    #[must_use]
    pub fn is_invalid_length(&self) -> bool {
        matches!(self, Self::InvalidLength { .. })
    }
}

pub type Result<T> = std::result::Result<T, WordleError>;
