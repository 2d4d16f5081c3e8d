use crate::feedback::Evaluation;
use crate::game_state::{FeedbackInput, GameInterface, LoopMode, UserAction, WelcomeInfo};
use crate::render::{AnsiRenderer, PlainRenderer, headline, render_board, render_row, share_grid};
use crate::session::{BoardRow, GuessOutcome};
use crate::word::Word;
use crate::debug_log;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Wordle CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a whitespace-delimited word list
    #[arg(short = 'd', long = "dictionary", visible_alias = "input")]
    pub dictionary_path: Option<PathBuf>,

    /// Answer for the first game instead of a random word
    #[arg(short, long)]
    pub answer: Option<String>,

    /// Seed for picking answers, for reproducible games
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Use the line-based shell instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Show feedback as [A] (A) A instead of colors in the line shell
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Guess a hidden word (default)
    Play,
    /// Narrow down the answer of a game played elsewhere
    Assist,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or(Mode::Play)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

const USAGE: &str = "usage: <word> | search | new | exit";

/// Parse one input line. `None` means nothing to act on.
pub fn parse_action(line: &str) -> Option<UserAction> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    // None of these commands has five letters, so they never shadow a guess
    let action = match first.to_lowercase().as_str() {
        "exit" | "quit" => UserAction::Exit,
        "search" => UserAction::Search,
        "new" | "next" => UserAction::NewGame,
        _ => UserAction::Guess(first.to_string()),
    };
    Some(action)
}

/// Line-oriented implementation of [`GameInterface`] over any reader and
/// writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: true,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("write failed: {}", e);
        }
    }

    fn prompt(&mut self, text: &str) {
        if let Err(e) = write!(self.writer, "{text}").and_then(|()| self.writer.flush()) {
            debug_log!("write failed: {}", e);
        }
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input),
            Err(e) => {
                debug_log!("read failed: {}", e);
                None
            }
        }
    }

    fn board(&self, board: &[BoardRow]) -> String {
        if self.color {
            render_board(&AnsiRenderer, board)
        } else {
            render_board(&PlainRenderer, board)
        }
    }

    fn row(&self, word: &Word, feedback: &Evaluation) -> String {
        if self.color {
            render_row(&AnsiRenderer, word, feedback).join(" ")
        } else {
            render_row(&PlainRenderer, word, feedback).join(" ")
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_welcome(&mut self, info: &WelcomeInfo) {
        self.say(format!("Loaded {} words.", info.word_count));
        match info.mode {
            LoopMode::Play => self.say("Guess a word."),
            LoopMode::Assist => self.say("Enter each guess you made, then its feedback."),
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        self.prompt("> ");
        let Some(line) = self.read_line() else {
            return Some(UserAction::Exit);
        };
        if line.trim().is_empty() {
            return None;
        }
        let action = parse_action(&line);
        if action.is_none() {
            self.say(USAGE);
        }
        action
    }

    fn read_feedback(&mut self, guess: &Word) -> FeedbackInput {
        self.say(format!(
            "Enter feedback for {guess} (G=green, Y=yellow, X=gray, e.g. GYXXG):"
        ));
        self.prompt("> ");
        let Some(line) = self.read_line() else {
            return FeedbackInput::Exit;
        };
        match Evaluation::parse(&line) {
            Some(feedback) => {
                let row = self.row(guess, &feedback);
                self.say(row);
                FeedbackInput::Marked(feedback)
            }
            None => {
                self.say("Invalid feedback. Please enter 5 characters using G, Y, or X.");
                FeedbackInput::Retry
            }
        }
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome, board: &[BoardRow]) {
        self.say(headline(outcome));
        if outcome.won {
            let grid = share_grid(board);
            self.say(grid);
            return;
        }
        let mut lines = self.board(board);
        if !outcome.in_dictionary {
            if !lines.is_empty() {
                lines.push('\n');
            }
            lines.push_str(&self.row(&outcome.guess, &outcome.feedback));
        }
        if !lines.is_empty() {
            self.say(lines);
        }
    }

    fn display_candidates(&mut self, candidates: &[Word]) {
        for word in candidates {
            self.say(word);
        }
        self.say(format!("Possible candidates ({})", candidates.len()));
    }

    fn display_error(&mut self, message: &str) {
        self.say(message);
    }

    fn display_solution_found(&mut self, solution: &Word) {
        self.say(format!("Solution found: {solution}"));
    }

    fn display_no_candidates_message(&mut self) {
        self.say("No candidates remain. Check your inputs.");
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.say(format!("New game started. Loaded {word_count} words."));
    }

    fn display_exit_message(&mut self, answer: Option<&Word>) {
        if let Some(answer) = answer {
            self.say(format!("The answer was {answer}."));
        }
        self.say("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn interface(input: &str) -> CliInterface<Cursor<&str>, Vec<u8>> {
        CliInterface::new(Cursor::new(input), Vec::new()).with_color(false)
    }

    fn output(interface: CliInterface<Cursor<&str>, Vec<u8>>) -> String {
        String::from_utf8(interface.into_writer()).unwrap()
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["wordle"]).unwrap();
        assert_eq!(cli.dictionary_path, None);
        assert_eq!(cli.answer, None);
        assert!(!cli.plain);
        assert_eq!(cli.mode(), Mode::Play);
    }

    #[test]
    fn test_parse_cli_options() {
        let cli = Cli::try_parse_from([
            "wordle", "--input", "words.txt", "-a", "crane", "--seed", "7", "--plain", "assist",
        ])
        .unwrap();
        assert_eq!(cli.dictionary_path, Some(PathBuf::from("words.txt")));
        assert_eq!(cli.answer.as_deref(), Some("crane"));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.plain);
        assert_eq!(cli.mode(), Mode::Assist);
    }

    #[test]
    fn test_parse_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["wordle", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("crane\n"), Some(UserAction::Guess("crane".to_string())));
        assert_eq!(parse_action("  EXIT "), Some(UserAction::Exit));
        assert_eq!(parse_action("quit"), Some(UserAction::Exit));
        assert_eq!(parse_action("Search"), Some(UserAction::Search));
        assert_eq!(parse_action("next"), Some(UserAction::NewGame));
        assert_eq!(parse_action("new"), Some(UserAction::NewGame));
        assert_eq!(parse_action("two words"), None);
        assert_eq!(parse_action("   "), None);
    }

    #[test]
    fn test_read_action_eof_exits() {
        let mut cli = interface("");
        assert_eq!(cli.read_action(), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_action_usage() {
        let mut cli = interface("two words\n");
        assert_eq!(cli.read_action(), None);
        assert!(output(cli).contains(USAGE));
    }

    #[test]
    fn test_read_feedback_valid() {
        let mut cli = interface("gyxxg\n");
        let guess = Word::parse("CRANE").unwrap();
        match cli.read_feedback(&guess) {
            FeedbackInput::Marked(feedback) => assert_eq!(feedback.to_string(), "GYXXG"),
            other => panic!("Expected Marked, got {other:?}"),
        }
        assert!(output(cli).contains("[C] (R)  A   N  [E]"));
    }

    #[test]
    fn test_read_feedback_invalid() {
        let mut cli = interface("GGG\n");
        let guess = Word::parse("CRANE").unwrap();
        assert_eq!(cli.read_feedback(&guess), FeedbackInput::Retry);
        assert!(output(cli).contains("Invalid feedback"));
    }

    #[test]
    fn test_read_feedback_eof() {
        let mut cli = interface("");
        let guess = Word::parse("CRANE").unwrap();
        assert_eq!(cli.read_feedback(&guess), FeedbackInput::Exit);
    }

    #[test]
    fn test_display_non_word_outcome_shows_row() {
        let mut cli = interface("");
        let guess = Word::parse("CRONE").unwrap();
        let outcome = GuessOutcome {
            guess,
            feedback: Evaluation::parse("GGXGG").unwrap(),
            in_dictionary: false,
            won: false,
        };
        cli.display_outcome(&outcome, &[]);
        assert_eq!(output(cli), "CRONE is not a word.\n[C] [R]  O  [N] [E]\n");
    }

    #[test]
    fn test_display_exit_reveals_answer() {
        let mut cli = interface("");
        cli.display_exit_message(Some(&Word::parse("CRANE").unwrap()));
        assert_eq!(output(cli), "The answer was CRANE.\nExiting.\n");
    }
}
