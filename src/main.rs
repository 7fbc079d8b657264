use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::info;
use typespeed::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    passage::{FixedPassage, Passage, PassagePool, PassageSet, TextProvider},
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    TICK_RATE_MS,
};

/// typing speed test: type a passage, get wpm, accuracy and errors
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing speed test. The timer starts on your first keystroke and stops when the passage is fully typed; words per minute, accuracy and errors are shown at the end."
)]
pub struct Cli {
    /// custom passage to type instead of one from the pool
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// built-in passage set to draw from
    #[clap(short = 's', long, value_enum)]
    passage_set: Option<PassageSet>,

    /// JSON passage file: {"name": "...", "passages": ["...", ...]}
    #[clap(long, value_name = "FILE")]
    passages: Option<PathBuf>,

    /// tracing filter for the log file, e.g. `debug` (RUST_LOG takes precedence)
    #[clap(long)]
    log_filter: Option<String>,

    /// read settings from this config file instead of the default location
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(set) = self.passage_set {
            config.passage_set = set;
            // an explicit set means the built-in pool, not the configured file
            config.passages_file = None;
        }
        if let Some(ref path) = self.passages {
            config.passages_file = Some(path.clone());
        }
        if let Some(ref filter) = self.log_filter {
            config.log_filter = filter.clone();
        }
        config
    }

    fn text_provider(&self, config: &Config) -> typespeed::Result<Box<dyn TextProvider>> {
        if let Some(ref prompt) = self.prompt {
            return Ok(Box::new(FixedPassage::new(Passage::new(prompt.clone())?)));
        }
        let pool = match config.passages_file {
            Some(ref path) => PassagePool::from_file(path)?,
            None => PassagePool::builtin(config.passage_set)?,
        };
        Ok(Box::new(pool))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = cli.apply_to(store.load());

    let provider = match cli.text_provider(&config) {
        Ok(provider) => provider,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, err).exit();
        }
    };

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(err) = logging::init(&log_path, &config.log_filter) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    info!(
        passage_set = %config.passage_set,
        passages_file = ?config.passages_file,
        "starting"
    );

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(provider);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match app.on_event(runner.step()) {
            Flow::Quit => break,
            Flow::Redraw => {
                terminal.draw(|f| ui(app, f))?;
            }
            Flow::Continue => {}
        }
    }

    info!("exiting");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
