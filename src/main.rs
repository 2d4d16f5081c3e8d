use std::io::{self, IsTerminal};
use std::process::ExitCode;
use wordle::cli::{Cli, CliInterface, Mode, parse_cli};
use wordle::game_state::{GameInterface, LoopMode, assist_loop, play_loop};
use wordle::tui::TuiInterface;
use wordle::{Dictionary, Result, info_log, load_dictionary, logging};

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Some(path) = logging::init() {
        info_log!("Logging to {}", path.display());
    }

    let dictionary = match load_dictionary(cli.dictionary_path.as_deref()) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("Failed to load dictionary: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &dictionary) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, dictionary: &Dictionary) -> Result<()> {
    let mode = match cli.mode() {
        Mode::Play => LoopMode::Play,
        Mode::Assist => LoopMode::Assist,
    };

    // Piped input gets the line shell; the TUI needs a real terminal
    if cli.plain || !io::stdin().is_terminal() {
        let stdin = io::stdin();
        let mut interface =
            CliInterface::new(stdin.lock(), io::stdout()).with_color(!cli.no_color);
        return dispatch(cli, dictionary, mode, &mut interface);
    }

    info_log!("Starting TUI in {:?} mode", mode);
    let mut interface = TuiInterface::new(mode)?;
    // The terminal is restored on drop, before any error reaches stderr
    dispatch(cli, dictionary, mode, &mut interface)
}

fn dispatch<I: GameInterface>(
    cli: &Cli,
    dictionary: &Dictionary,
    mode: LoopMode,
    interface: &mut I,
) -> Result<()> {
    match mode {
        LoopMode::Play => {
            let mut rng = cli.rng();
            play_loop(dictionary, cli.answer.as_deref(), &mut rng, interface)
        }
        LoopMode::Assist => {
            assist_loop(dictionary, interface);
            Ok(())
        }
    }
}
