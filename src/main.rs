//! markshelf - Terminal Bookmark Manager
//!
//! Runs the TUI when started without a subcommand, otherwise executes the
//! CLI subcommand against the same bookmark store and exits.

use clap::Parser;
use markshelf::app::App;
use markshelf::cli::{self, Cli};
use markshelf::config::Config;
use markshelf::desktop::SystemDesktop;
use markshelf::handlers;
use markshelf::logging;
use markshelf::models::FileBackend;
use markshelf::store::Store;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::error::Error;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let args = Cli::parse();
    let config = Config::load()?;
    let data_dir = config.resolve_data_dir()?;
    let guard = logging::init(&data_dir)?;

    if let Some(command) = args.command {
        info!(?command, "running cli command");
        if let Err(err) = cli::execute(command, &config, &data_dir) {
            cli::print_error(&err);
            drop(guard);
            std::process::exit(1);
        }
        return Ok(());
    }

    run_tui(&config, &data_dir)
}

/// Sets up the terminal, runs the event loop and always restores the
/// terminal afterwards, even when the loop fails.
fn run_tui(config: &Config, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let store = Store::load(FileBackend::new(data_dir)?)?;
    let mut app = App::new(store, config, Box::new(SystemDesktop::new()));
    info!(data_dir = %data_dir.display(), "starting tui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("tui closed");
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let mut should_quit = false;

    while !should_quit {
        terminal.draw(|frame| app.render(frame))?;
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                should_quit = handlers::keys::handle_key_events(key, app);
            }
        }
        app.tick();
    }

    Ok(())
}
