mod ui;

use std::{
    io::{self, stdin},
    time::Instant,
};

use anyhow::{Context, Result};
use brewguide::{
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    cue::{CueSink, SoundMode, TerminalBell},
    guide::Guide,
    input::{self, Action},
    logging,
    runtime::{CrosstermEventSource, GuideEvent, GuideEventSource, Runner, UI_TICK_RATE},
    scheduler::IntervalScheduler,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

/// step-by-step brewing guide for espresso, pour-over and cold brew
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Walks through espresso, pour-over filter and cold brew recipes screen by screen, works out dose and water from your choices, and counts down the brew with terminal bell cues."
)]
pub struct Cli {
    /// which countdown cues ring the terminal bell (defaults to the saved preference)
    #[clap(long, value_enum)]
    sound: Option<SoundMode>,

    /// remember the --sound choice for future runs
    #[clap(long, requires = "sound")]
    save: bool,

    /// tracing filter for the log file, e.g. `debug` or `brewguide=trace`
    #[clap(long)]
    log_level: Option<String>,
}

pub struct App {
    pub guide: Guide<IntervalScheduler, Box<dyn CueSink>>,
    pub sound: SoundMode,
}

impl App {
    pub fn new(sound: SoundMode, cues: Box<dyn CueSink>) -> Self {
        Self {
            guide: Guide::new(IntervalScheduler::every_second(), cues),
            sound,
        }
    }

    /// Route one event into the guide. Returns `None` when the user asked to
    /// quit, otherwise whether the screen needs a redraw.
    pub fn handle(&mut self, event: GuideEvent, now: Instant) -> Option<bool> {
        match event {
            GuideEvent::Tick => Some(self.guide.pump(now) > 0),
            GuideEvent::Resize => Some(true),
            GuideEvent::Key(key) => {
                let step = self.guide.session().step();
                match input::action_for_key(step, key) {
                    Some(Action::Quit) => None,
                    Some(action) => Some(self.guide.apply(action)),
                    None => Some(false),
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = logging::init_file_logging(
        &AppDirs::state_dir(),
        &logging::filter_directive(cli.log_level.as_deref()),
    )?;

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(sound) = cli.sound {
        config.sound = sound;
        if cli.save {
            store.save(&config).context("save preferences")?;
            info!(path = %store.path().display(), "preferences saved");
        }
    }

    let mut app = App::new(config.sound, Box::new(TerminalBell::stdout(config.sound)));
    info!(sound = %config.sound, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::spawn(), UI_TICK_RATE);
    let outcome = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.guide.reset();
    outcome
}

fn start_tui<B: Backend, E: GuideEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<()> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let Some(redraw) = app.handle(runner.step(), Instant::now()) else {
            break;
        };
        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
