//! Presentation of feedback. Renderers only map [`LetterFeedback`] values
//! to output; they never recompute feedback.

use crate::feedback::{Evaluation, LetterFeedback};
use crate::session::{BoardRow, GuessOutcome};
use crate::word::{WORD_LENGTH, Word};
use crossterm::style::{Color, Stylize, style};

/// Maps one letter and its feedback to an output tile.
pub trait FeedbackRenderer {
    type Tile;

    fn tile(&self, letter: char, feedback: LetterFeedback) -> Self::Tile;
}

/// Render every position of `word`.
pub fn render_row<R: FeedbackRenderer>(
    renderer: &R,
    word: &Word,
    feedback: &Evaluation,
) -> Vec<R::Tile> {
    (0..WORD_LENGTH)
        .map(|i| renderer.tile(word.letter(i), feedback.get(i)))
        .collect()
}

/// Colored squares, as shared after a win. The letter is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiRenderer;

impl FeedbackRenderer for EmojiRenderer {
    type Tile = char;

    fn tile(&self, _letter: char, feedback: LetterFeedback) -> char {
        match feedback {
            LetterFeedback::Exact => '🟩',
            LetterFeedback::Present => '🟨',
            LetterFeedback::Absent => '⬜',
        }
    }
}

/// Terminal background colors via ANSI escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiRenderer;

impl FeedbackRenderer for AnsiRenderer {
    type Tile = String;

    fn tile(&self, letter: char, feedback: LetterFeedback) -> String {
        let background = match feedback {
            LetterFeedback::Exact => Color::Green,
            LetterFeedback::Present => Color::Yellow,
            LetterFeedback::Absent => Color::White,
        };
        style(format!(" {letter} "))
            .with(Color::Black)
            .on(background)
            .to_string()
    }
}

/// Bracketed letters for terminals without color: `[A]` exact,
/// `(A)` present, ` A ` absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl FeedbackRenderer for PlainRenderer {
    type Tile = String;

    fn tile(&self, letter: char, feedback: LetterFeedback) -> String {
        match feedback {
            LetterFeedback::Exact => format!("[{letter}]"),
            LetterFeedback::Present => format!("({letter})"),
            LetterFeedback::Absent => format!(" {letter} "),
        }
    }
}

/// One line per row, tiles separated by a space.
pub fn render_board<R>(renderer: &R, board: &[BoardRow]) -> String
where
    R: FeedbackRenderer<Tile = String>,
{
    board
        .iter()
        .map(|row| render_row(renderer, &row.word, &row.feedback).join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn share_grid(board: &[BoardRow]) -> String {
    board
        .iter()
        .map(|row| {
            render_row(&EmojiRenderer, &row.word, &row.feedback)
                .into_iter()
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn headline(outcome: &GuessOutcome) -> String {
    if outcome.won {
        format!("{} is correct!", outcome.guess)
    } else if outcome.in_dictionary {
        format!("{} is not correct.", outcome.guess)
    } else {
        format!("{} is not a word.", outcome.guess)
    }
}
