use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use shrinesplit::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    rando::Preset,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Flow, Runner},
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// split timer for the BotW all shrines randomizer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal split timer for the BotW All Shrines Randomizer. Pick a seed, then split at every shrine; the Blood Moon can be inserted wherever it strikes."
)]
pub struct Cli {
    /// seed to start with, skipping the seed picker
    #[clap(short = 's', long)]
    seed: Option<String>,

    /// randomizer preset (defaults to the configured one)
    #[clap(short = 'p', long, value_enum)]
    preset: Option<Preset>,

    /// show the seed in the header
    #[clap(long)]
    show_seed: bool,

    /// redraw interval of the running clock in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,

    /// write logs to this file (defaults to the state dir when given without a value)
    #[clap(long)]
    log_file: Option<Option<PathBuf>>,

    /// persist the preset and seed visibility flags as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Merges command line overrides on top of the stored config
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(preset) = self.preset {
            config.preset = preset;
        }
        if self.show_seed {
            config.show_seed = true;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_rate_ms = tick_ms;
        }
        config
    }

    fn log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(Some(path)) => Some(path.clone()),
            Some(None) => AppDirs::log_path(),
            None => None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_path() {
        logging::init_file_logger(&path)?;
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!("config saved to {}", store.path().display());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, cli.seed.clone());
    let result = start_tui(&mut terminal, &mut app, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::from_millis(config.tick_rate_ms),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    runner.run_until(None, |event| -> Result<Flow, Box<dyn Error>> {
        let flow = match event {
            AppEvent::Tick if !app.run().has_started() => return Ok(Flow::Continue),
            event => app.handle_event(event),
        };
        if flow == Flow::Continue {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
        Ok(flow)
    })?;

    info!("exiting");
    Ok(())
}
