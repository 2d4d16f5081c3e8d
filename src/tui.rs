//! TUI (Terminal User Interface) module for the Wordle game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! - Play: `EnteringGuess` → (win) `GameOver` → `EnteringGuess` on a new game
//! - Assist: `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` →
//!   `FeedbackRecorded` → back to `EnteringGuess`
//!
//! Ctrl-C arrives as a key event in raw mode and is treated like Esc.

use crate::feedback::{Evaluation, LetterFeedback};
use crate::game_state::{FeedbackInput, GameInterface, LoopMode, UserAction, WelcomeInfo};
use crate::render::{FeedbackRenderer, headline, render_row, share_grid};
use crate::session::{BoardRow, GuessOutcome};
use crate::word::{WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_CANDIDATES_DISPLAY: usize = 10;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const ENTERED_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

/// Colored tiles for the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileRenderer;

impl FeedbackRenderer for TileRenderer {
    type Tile = Span<'static>;

    fn tile(&self, letter: char, feedback: LetterFeedback) -> Span<'static> {
        let (bg, fg) = match feedback {
            LetterFeedback::Exact => (Color::Green, Color::Black),
            LetterFeedback::Present => (Color::Yellow, Color::Black),
            LetterFeedback::Absent => (Color::Gray, Color::White),
        };
        Span::styled(format!(" {letter} "), Style::default().fg(fg).bg(bg))
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum TileState {
    Entered,
    Marked(LetterFeedback),
}

#[derive(Debug)]
struct GuessRow {
    word: Word,
    states: [TileState; WORD_LENGTH],
}

impl GuessRow {
    fn from_word(word: Word) -> Self {
        Self {
            word,
            states: [TileState::Entered; WORD_LENGTH],
        }
    }

    fn from_board(row: &BoardRow) -> Self {
        let mut states = [TileState::Entered; WORD_LENGTH];
        for (state, feedback) in states.iter_mut().zip(row.feedback.iter()) {
            *state = TileState::Marked(feedback);
        }
        Self {
            word: row.word,
            states,
        }
    }

    /// The feedback once every tile has been marked.
    fn feedback(&self) -> Option<Evaluation> {
        let mut marks = [LetterFeedback::Absent; WORD_LENGTH];
        for (mark, state) in marks.iter_mut().zip(self.states) {
            match state {
                TileState::Marked(feedback) => *mark = feedback,
                TileState::Entered => return None,
            }
        }
        Some(Evaluation::new(marks))
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::raw("  ")];
        for (i, state) in self.states.iter().enumerate() {
            let letter = self.word.letter(i);
            spans.push(match state {
                TileState::Marked(feedback) => TileRenderer.tile(letter, *feedback),
                TileState::Entered => Span::styled(format!(" {letter} "), ENTERED_STYLE),
            });
            spans.push(Span::raw(" "));
        }
        spans
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    FeedbackRecorded,
    /// Solved or no candidates left - message stored in interface.message
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    title: &'a str,
    guesses: &'a [GuessRow],
    current_input: &'a str,
    state: TuiState,
    candidates_display: &'a [String],
    candidate_total: Option<usize>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    mode: LoopMode,
    guesses: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    candidates_display: Vec<String>,
    candidate_total: Option<usize>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new(mode: LoopMode) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            mode,
            guesses: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            candidates_display: Vec::new(),
            candidate_total: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn title(&self) -> &'static str {
        match self.mode {
            LoopMode::Play => "WORDLE",
            LoopMode::Assist => "WORDLE ASSIST",
        }
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            title: self.title(),
            guesses: &self.guesses,
            current_input: &self.current_input,
            state: self.state,
            candidates_display: &self.candidates_display,
            candidate_total: self.candidate_total,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Game board
                Constraint::Min(8),     // Info panel
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        let title = Paragraph::new(ctx.title)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);
        Self::render_board(f, chunks[1], ctx.guesses, ctx.current_input, ctx.state);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_board(
        f: &mut Frame,
        area: Rect,
        guesses: &[GuessRow],
        current_input: &str,
        state: TuiState,
    ) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let available_rows = (inner.height / ROW_SPACING) as usize;
        let showing_input = state == TuiState::EnteringGuess;
        let rows_needed = guesses.len() + usize::from(showing_input);

        // Most recent rows win when the board overflows
        let skip_count = rows_needed.saturating_sub(available_rows);
        let visible = guesses.len() - skip_count.min(guesses.len());
        let marking_row = visible.checked_sub(1);

        for (display_index, guess) in guesses.iter().skip(skip_count).enumerate() {
            let mut spans = guess.spans();
            if let TuiState::MarkingFeedback { marking_index } = state {
                if Some(display_index) == marking_row {
                    spans.push(Span::raw(format!(
                        " <- Marking letter {} (G/Y/X)",
                        marking_index + 1
                    )));
                }
            }
            Self::render_line(f, inner, display_index, spans);
        }

        if showing_input {
            let mut spans = vec![Span::raw("  ")];
            for i in 0..WORD_LENGTH {
                let letter = current_input.chars().nth(i).unwrap_or(' ');
                spans.push(Span::styled(format!(" {letter} "), ENTERED_STYLE));
                spans.push(Span::raw(" "));
            }
            Self::render_line(f, inner, visible, spans);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_line(f: &mut Frame, area: Rect, row_index: usize, spans: Vec<Span>) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }
        f.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(total) = ctx.candidate_total {
            lines.push(Line::from(vec![Span::styled(
                format!("Possible candidates ({total}):"),
                INFO_STYLE,
            )]));
            for word in ctx.candidates_display {
                lines.push(Line::from(format!("  {word}")));
            }
            if total > ctx.candidates_display.len() {
                lines.push(Line::from(format!(
                    "  ... and {} more",
                    total - ctx.candidates_display.len()
                )));
            }
            lines.push(Line::from(""));
        }

        for (i, text) in ctx.message.lines().enumerate() {
            let style = if i == 0 && ctx.state == TuiState::GameOver {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(text.to_string(), style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Type a 5-letter guess | ENTER: Submit | TAB: Search | CTRL-N: New game | ESC: Quit"
            }
            TuiState::MarkingFeedback { .. } => {
                "G: Green (correct) | Y: Yellow (wrong position) | X: Gray (not in word) | BACKSPACE: Go back"
            }
            TuiState::ConfirmingFeedback => "ENTER: Confirm feedback | BACKSPACE: Go back and edit",
            TuiState::FeedbackRecorded => "Filtering candidates...",
            TuiState::GameOver => "N: New game | TAB: Search | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Wait for one key press and apply it to the current state.
    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            // Mouse, focus, paste and resize events
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        if Self::is_interrupt(&key) {
            info_log!("handle_input() - Ctrl-C pressed, returning Exit");
            return Ok(Some(UserAction::Exit));
        }

        // Garbage from escape sequences when alt-tabbing
        if let KeyCode::Char(c) = key.code {
            if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
                return Ok(None);
            }
        }

        debug_log!(
            "handle_input() - key={:?}, modifiers={:?}, state={:?}",
            key.code,
            key.modifiers,
            self.state
        );
        Ok(match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::MarkingFeedback { marking_index } => {
                self.handle_feedback_input(key, marking_index)
            }
            TuiState::ConfirmingFeedback => self.handle_confirming_feedback_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
            TuiState::FeedbackRecorded => None,
        })
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        match key.code {
            KeyCode::Char('n' | 'N') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(UserAction::NewGame);
            }
            KeyCode::Char(c) if c.is_alphabetic() && self.current_input.chars().count() < WORD_LENGTH => {
                if Self::has_modifier_keys(&key) {
                    debug_log!("handle_guess_input() - Ignoring modified key {:?}", key.modifiers);
                } else {
                    self.current_input.extend(c.to_uppercase());
                }
            }
            KeyCode::Char(c) if !c.is_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.chars().count() == WORD_LENGTH => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = "Guess must be exactly 5 letters!".to_string();
            }
            KeyCode::Tab => return Some(UserAction::Search),
            KeyCode::Esc => return Some(UserAction::Exit),
            _ => {}
        }
        None
    }

    fn handle_feedback_input(&mut self, key: KeyEvent, marking_index: usize) -> Option<UserAction> {
        if Self::has_modifier_keys(&key) {
            return None;
        }
        let mark = match key.code {
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Char(c) => match LetterFeedback::from_char(c) {
                Some(mark) => mark,
                None => {
                    self.error_message = format!(
                        "Invalid feedback! Use G (green), Y (yellow), or X (gray). ('{c}' is not valid)"
                    );
                    return None;
                }
            },
            KeyCode::Backspace => {
                self.step_back(marking_index);
                return None;
            }
            _ => return None,
        };

        self.error_message.clear();
        if let Some(row) = self.guesses.last_mut() {
            row.states[marking_index] = TileState::Marked(mark);
        }
        self.state = if marking_index + 1 < WORD_LENGTH {
            TuiState::MarkingFeedback {
                marking_index: marking_index + 1,
            }
        } else {
            TuiState::ConfirmingFeedback
        };
        None
    }

    /// Undo the previous mark, or abandon the row from the first tile.
    fn step_back(&mut self, marking_index: usize) {
        if marking_index == 0 {
            self.guesses.pop();
            self.state = TuiState::EnteringGuess;
            self.status = "Guess discarded".to_string();
            return;
        }
        if let Some(row) = self.guesses.last_mut() {
            row.states[marking_index - 1] = TileState::Entered;
        }
        self.state = TuiState::MarkingFeedback {
            marking_index: marking_index - 1,
        };
    }

    fn handle_confirming_feedback_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Enter => {
                self.state = TuiState::FeedbackRecorded;
                None
            }
            KeyCode::Backspace => {
                self.step_back(WORD_LENGTH);
                None
            }
            _ => None,
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Tab => Some(UserAction::Search),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn is_interrupt(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c' | 'C'))
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, info: &WelcomeInfo) {
        self.message = match info.mode {
            LoopMode::Play => format!("Loaded {} words. Guess a word.", info.word_count),
            LoopMode::Assist => format!(
                "Loaded {} words. Enter each guess you made, then mark its feedback.",
                info.word_count
            ),
        };
        self.status = "Ready - Enter your first 5-letter guess".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn read_feedback(&mut self, guess: &Word) -> FeedbackInput {
        self.guesses.push(GuessRow::from_word(*guess));
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
        self.error_message.clear();
        self.status = format!("Guess entered: {guess} - Mark each letter G, Y, or X");

        loop {
            if self.state == TuiState::ConfirmingFeedback {
                self.status = "Press ENTER to confirm feedback".to_string();
            }
            if self.draw().is_err() {
                return FeedbackInput::Exit;
            }
            match self.handle_input() {
                Ok(Some(UserAction::Exit)) => return FeedbackInput::Exit,
                Ok(_) => {}
                Err(e) => {
                    debug_log!("read_feedback() - Input error: {}", e);
                    return FeedbackInput::Exit;
                }
            }
            match self.state {
                TuiState::FeedbackRecorded => {
                    self.state = TuiState::EnteringGuess;
                    self.status = "Feedback recorded".to_string();
                    return match self.guesses.last().and_then(GuessRow::feedback) {
                        Some(feedback) => FeedbackInput::Marked(feedback),
                        None => FeedbackInput::Retry,
                    };
                }
                TuiState::EnteringGuess => return FeedbackInput::Retry,
                _ => {}
            }
        }
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome, board: &[BoardRow]) {
        self.guesses = board.iter().map(GuessRow::from_board).collect();
        self.error_message.clear();
        if outcome.won {
            self.state = TuiState::GameOver;
            self.message = format!("{}\n{}", headline(outcome), share_grid(board));
            self.status = format!("Solved in {} guesses", board.len());
        } else if outcome.in_dictionary {
            self.message = headline(outcome);
            self.status = format!("{} guesses so far", board.len());
        } else {
            let tiles: String = render_row(&TileRenderer, &outcome.guess, &outcome.feedback)
                .iter()
                .map(|span| span.content.as_ref())
                .collect();
            self.message = headline(outcome);
            self.error_message = format!("Not counted:{tiles}");
        }
        self.draw_or_log();
    }

    fn display_candidates(&mut self, candidates: &[Word]) {
        self.candidates_display = candidates
            .iter()
            .take(MAX_CANDIDATES_DISPLAY)
            .map(ToString::to_string)
            .collect();
        self.candidate_total = Some(candidates.len());
        self.status = format!("{} candidates remaining", candidates.len());
        self.draw_or_log();
    }

    fn display_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_solution_found(&mut self, solution: &Word) {
        self.state = TuiState::GameOver;
        self.message = format!("✓ Solution found: {solution}");
        self.status = format!("Game Over - Solution: {solution}");
        self.draw_or_log();
    }

    fn display_no_candidates_message(&mut self) {
        self.state = TuiState::GameOver;
        self.message = "No candidates remain. Check your inputs.".to_string();
        self.status = "Error: No valid candidates found".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.guesses.clear();
        self.current_input.clear();
        self.candidates_display.clear();
        self.candidate_total = None;
        self.state = TuiState::EnteringGuess;
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = "New game - Enter your first guess".to_string();
        self.error_message.clear();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self, answer: Option<&Word>) {
        self.message = match answer {
            Some(answer) => format!("The answer was {answer}. Exiting..."),
            None => "Exiting...".to_string(),
        };
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
